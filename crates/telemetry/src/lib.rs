//! Parsing layer between raw capture files and the numeric core.
//!
//! Everything that turns text into samples lives here: unit stripping,
//! `NaN` coercion, header skipping and per-format column picking.  The
//! aggregation code in `simstat-core` only ever sees `f64`s.

pub mod column;
pub mod fields;
pub mod memory;
pub mod rtt;
pub mod stats;
pub mod usage;

pub use column::read_column;
pub use fields::{parse_number, parse_with_suffix};
pub use memory::format_mebibytes;
pub use rtt::{read_rtt, RttSeries};
pub use stats::{read_container_stats, ContainerSeries, ContainerStat};
pub use usage::{normalize_cpu, read_node_usage, usage_path, NodeUsage};

use simstat_core::{Result, SimError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV reader shared by every capture format: first row is a header, rows
/// may be ragged.
pub(crate) fn capture_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

pub(crate) fn open(path: &Path) -> Result<File> {
    tracing::debug!("Opening capture {}", path.display());
    Ok(File::open(path)?)
}

pub(crate) fn csv_error(e: csv::Error) -> SimError {
    SimError::Csv(e.to_string())
}
