use crate::aggregate;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Telemetry channel a series was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Cpu,
    Memory,
    Rtt,
    NetworkIn,
    NetworkOut,
}

impl Channel {
    /// Legend label shown on charts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu        => "Cpu usage",
            Self::Memory     => "Mem usage",
            Self::Rtt        => "Rtt",
            Self::NetworkIn  => "Network Input",
            Self::NetworkOut => "Network Output",
        }
    }
}

/// An ordered, labelled sequence of samples from one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub channel: Channel,
    /// X-axis labels.  May be longer or shorter than `values`.
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    /// Series labelled by sample index (`0, 1, 2, …`).
    pub fn indexed(channel: Channel, values: Vec<f64>) -> Self {
        let labels = (0..values.len()).map(|i| i.to_string()).collect();
        Self { channel, labels, values }
    }

    pub fn with_labels(channel: Channel, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { channel, labels, values }
    }

    /// Replace the values with their moving average.  Labels are kept as-is,
    /// so the trailing `window - 1` labels end up without a bar.
    pub fn smoothed(self, window: usize) -> Result<Self> {
        let values = aggregate::moving_average(&self.values, window)?;
        Ok(Self { values, ..self })
    }

    /// Drop non-finite values and relabel by index.
    #[must_use]
    pub fn finite(self) -> Self {
        Self::indexed(self.channel, aggregate::finite(&self.values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest finite value, if any.
    pub fn peak(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}
