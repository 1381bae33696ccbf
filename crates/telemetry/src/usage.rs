use crate::fields::number_at;
use crate::{capture_reader, csv_error, open};
use simstat_core::{Channel, Result, Series};
use std::io::Read;
use std::path::{Path, PathBuf};

/// CPU and memory columns of one node's `cpu,mem` capture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUsage {
    /// Raw CPU readings as captured.
    pub cpu: Vec<f64>,
    /// Memory readings (MiB).
    pub memory: Vec<f64>,
}

impl NodeUsage {
    /// CPU clamped to `ceiling` and scaled to percent of it.
    pub fn cpu_percent(&self, ceiling: f64) -> Series {
        let values = self.cpu.iter().map(|&v| normalize_cpu(v, ceiling)).collect();
        Series::indexed(Channel::Cpu, values)
    }

    pub fn memory_series(&self) -> Series {
        Series::indexed(Channel::Memory, self.memory.clone())
    }
}

/// Clamp a raw CPU reading to `ceiling` and express it as a percentage of
/// that ceiling.  `NaN` stays `NaN`.
pub fn normalize_cpu(raw: f64, ceiling: f64) -> f64 {
    let clamped = if raw > ceiling { ceiling } else { raw };
    clamped / ceiling * 100.0
}

/// Path of node `node`'s capture: `{node}` in `pattern` becomes the
/// zero-padded two-digit node number.
pub fn usage_path(dir: impl AsRef<Path>, pattern: &str, node: u32) -> PathBuf {
    dir.as_ref().join(pattern.replace("{node}", &format!("{node:02}")))
}

/// Read a `cpu,mem` capture (header row skipped).
pub fn read_node_usage(path: impl AsRef<Path>) -> Result<NodeUsage> {
    let path = path.as_ref();
    let usage = read_node_usage_from(open(path)?)?;
    tracing::debug!("{}: {} samples", path.display(), usage.cpu.len());
    Ok(usage)
}

pub fn read_node_usage_from<R: Read>(reader: R) -> Result<NodeUsage> {
    let mut usage = NodeUsage::default();
    for record in capture_reader(reader).records() {
        let record = record.map_err(csv_error)?;
        usage.cpu.push(number_at(&record, 0));
        usage.memory.push(number_at(&record, 1));
    }
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_then_scale() {
        assert_eq!(normalize_cpu(15.0, 30.0), 50.0);
        assert_eq!(normalize_cpu(45.0, 30.0), 100.0);
        assert!(normalize_cpu(f64::NAN, 30.0).is_nan());
    }

    #[test]
    fn blank_cpu_field_stays_nan() {
        let usage = read_node_usage_from("cpu,mem\n,100\n3,100\n".as_bytes()).unwrap();
        let cpu = usage.cpu_percent(30.0);
        assert!(cpu.values[0].is_nan());
        assert_eq!(cpu.values[1], 10.0);
    }

    #[test]
    fn node_paths_are_zero_padded() {
        let p = usage_path("cpu_usages", "nc{node}_cpu_mem_usage.csv", 3);
        assert_eq!(p, PathBuf::from("cpu_usages/nc03_cpu_mem_usage.csv"));
        let p = usage_path("x", "nc{node}.csv", 16);
        assert_eq!(p, PathBuf::from("x/nc16.csv"));
    }

    #[test]
    fn reads_columns_and_skips_header() {
        let raw = "cpu,mem\n3.0,120\n60,130.5\n\nbad,\n9\n";
        let usage = read_node_usage_from(raw.as_bytes()).unwrap();
        assert_eq!(usage.cpu.len(), 4);
        assert_eq!(usage.cpu[0], 3.0);
        assert_eq!(usage.memory[1], 130.5);
        assert!(usage.cpu[2].is_nan());
        assert!(usage.memory[2].is_nan());
        assert!(usage.memory[3].is_nan());

        let cpu = usage.cpu_percent(30.0);
        assert_eq!(cpu.values[0], 10.0);
        assert_eq!(cpu.values[1], 100.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_node_usage(dir.path().join("nc01.csv")).unwrap_err();
        assert!(matches!(err, simstat_core::SimError::Io { .. }));
    }
}
