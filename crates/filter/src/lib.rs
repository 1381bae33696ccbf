//! Row-level tools for raw telemetry CSVs: predicate filtering and
//! threshold counting.
//!
//! Neither tool treats the first row as a header; a header simply fails
//! numeric rules and lands in the `invalid` bucket when counting.

pub mod count;
pub mod rows;

pub use count::{count_file, count_threshold, ThresholdCount};
pub use rows::{filter_file, filter_rows, FilterSummary};

use simstat_core::SimError;
use std::io::Read;

pub(crate) fn raw_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

pub(crate) fn csv_error(e: csv::Error) -> SimError {
    SimError::Csv(e.to_string())
}
