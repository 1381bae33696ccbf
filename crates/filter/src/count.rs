use crate::{csv_error, raw_reader};
use simstat_core::{Result, SimError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// How many rows fall below / at-or-above a magnitude threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdCount {
    pub below: usize,
    pub above: usize,
    /// Rows whose column is missing or not a number.
    pub invalid: usize,
}

/// Classify `|row[column]|` against `threshold` for every row.
pub fn count_threshold<R: Read>(reader: R, column: usize, threshold: f64) -> Result<ThresholdCount> {
    if threshold.is_nan() {
        return Err(SimError::InvalidArgument("threshold must be a number".into()));
    }

    let mut count = ThresholdCount::default();
    for record in raw_reader(reader).records() {
        let record = record.map_err(csv_error)?;
        match record.get(column).and_then(|f| f.trim().parse::<f64>().ok()) {
            Some(v) if v.is_nan() => count.invalid += 1,
            Some(v) if v.abs() < threshold => count.below += 1,
            Some(_) => count.above += 1,
            None => count.invalid += 1,
        }
    }
    Ok(count)
}

pub fn count_file(path: impl AsRef<Path>, column: usize, threshold: f64) -> Result<ThresholdCount> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let count = count_threshold(file, column, threshold)?;
    info!(
        "{}: {} below {threshold}, {} at or above, {} invalid",
        path.display(),
        count.below,
        count.above,
        count.invalid
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_absolute_value() {
        let raw = "a,b,-25\na,b,19.9\na,b,20\na,b,-3\n";
        let count = count_threshold(raw.as_bytes(), 2, 20.0).unwrap();
        assert_eq!(count, ThresholdCount { below: 2, above: 2, invalid: 0 });
    }

    #[test]
    fn junk_rows_are_invalid() {
        let raw = "time,node,score\n1,2,x\n1,2\n1,2,5\n";
        let count = count_threshold(raw.as_bytes(), 2, 16.0).unwrap();
        assert_eq!(count, ThresholdCount { below: 1, above: 0, invalid: 3 });
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let err = count_threshold("1\n".as_bytes(), 0, f64::NAN).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = count_file(dir.path().join("nope.csv"), 2, 20.0).unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }

    #[test]
    fn counts_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anomalies.csv");
        std::fs::write(&path, "0,0,30\n0,0,1\n").unwrap();
        let count = count_file(&path, 2, 20.0).unwrap();
        assert_eq!((count.below, count.above), (1, 1));
    }
}
