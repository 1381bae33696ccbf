use crate::fields::number_at;
use crate::{capture_reader, csv_error, open};
use simstat_core::{Channel, Result, Series};
use std::io::Read;
use std::path::Path;

/// Round-trip times from an `id,rtt,timestamp` capture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RttSeries {
    /// Raw timestamp column, used verbatim as x labels.
    pub timestamps: Vec<String>,
    pub rtts: Vec<f64>,
}

impl RttSeries {
    pub fn series(&self) -> Series {
        Series::with_labels(Channel::Rtt, self.timestamps.clone(), self.rtts.clone())
    }
}

pub fn read_rtt(path: impl AsRef<Path>) -> Result<RttSeries> {
    read_rtt_from(open(path.as_ref())?)
}

pub fn read_rtt_from<R: Read>(reader: R) -> Result<RttSeries> {
    let mut out = RttSeries::default();
    for record in capture_reader(reader).records() {
        let record = record.map_err(csv_error)?;
        out.rtts.push(number_at(&record, 1));
        out.timestamps
            .push(record.get(2).map(str::trim).unwrap_or_default().to_string());
    }
    Ok(out)
}
