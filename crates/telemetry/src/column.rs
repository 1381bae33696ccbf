use crate::fields::number_at;
use crate::{capture_reader, csv_error, open};
use simstat_core::Result;
use std::io::Read;
use std::path::Path;

/// Read one numeric column of a headed CSV.  Missing or non-numeric fields
/// become `NaN`.
pub fn read_column(path: impl AsRef<Path>, column: usize) -> Result<Vec<f64>> {
    read_column_from(open(path.as_ref())?, column)
}

pub fn read_column_from<R: Read>(reader: R, column: usize) -> Result<Vec<f64>> {
    capture_reader(reader)
        .records()
        .map(|record| Ok(number_at(&record.map_err(csv_error)?, column)))
        .collect()
}
