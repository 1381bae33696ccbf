use crate::{csv_error, raw_reader};
use simstat_core::{ColumnRule, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Outcome of a filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub seen: usize,
    pub kept: usize,
}

/// Copy every row of `reader` that satisfies all `rules` to `writer`.
/// With no rules every row is kept.
pub fn filter_rows<R: Read, W: Write>(
    reader: R,
    writer: W,
    rules: &[ColumnRule],
) -> Result<FilterSummary> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let mut summary = FilterSummary::default();

    for record in raw_reader(reader).records() {
        let record = record.map_err(csv_error)?;
        summary.seen += 1;

        if rules.iter().all(|rule| rule.matches_field(record.get(rule.column))) {
            out.write_record(&record).map_err(csv_error)?;
            summary.kept += 1;
        }
    }

    out.flush()?;
    Ok(summary)
}

/// File wrapper around [`filter_rows`].  The output file is truncated.
pub fn filter_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    rules: &[ColumnRule],
) -> Result<FilterSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let src = File::open(input)?;
    let dst = File::create(output)?;

    let summary = filter_rows(src, dst, rules)?;
    info!(
        "Filtered rows written to {} ({} of {} kept)",
        output.display(),
        summary.kept,
        summary.seen
    );
    Ok(summary)
}
