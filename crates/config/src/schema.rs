use serde::{Deserialize, Serialize};
use simstat_core::ColumnRule;
use std::path::PathBuf;

/// Root configuration structure parsed from `simstat.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Per-node CPU / memory usage captures.
    pub usage: UsageConfig,
    /// ChirpStack RTT and container statistics captures.
    pub chirpstack: ChirpstackConfig,
    /// Chart size and colours.
    pub chart: ChartConfig,
    /// Row filter applied by `simstat filter`.
    pub filter: FilterConfig,
    /// Threshold counter applied by `simstat count`.
    pub count: CountConfig,
    /// Random device-credential fixture.
    pub devices: DevicesConfig,
}

/// Network-controller usage captures (`ncNN_cpu_mem_usage.csv`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Directory holding one CSV per node.
    pub input_dir: PathBuf,
    /// File name pattern; `{node}` becomes the two-digit node number.
    pub file_pattern: String,
    /// Number of nodes, numbered from 1.
    pub nodes: u32,
    /// Raw CPU readings above this are clamped before scaling to percent.
    pub cpu_ceiling: f64,
    /// Moving-average window for CPU.
    pub window: usize,
    /// Where per-node and averaged charts are written.
    pub output_dir: PathBuf,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            input_dir:    PathBuf::from("cpu_usages"),
            file_pattern: "nc{node}_cpu_mem_usage.csv".to_string(),
            nodes:        16,
            cpu_ceiling:  30.0,
            window:       6,
            output_dir:   PathBuf::from("plots"),
        }
    }
}

/// ChirpStack comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChirpstackConfig {
    /// `id,rtt,timestamp` capture.
    pub rtt_file: PathBuf,
    /// `docker stats` capture.
    pub stats_file: PathBuf,
    /// Container whose rows are charted, after `container_prefix` is removed.
    pub container: String,
    /// Compose project prefix stripped from container names.
    pub container_prefix: String,
    /// Window for RTT, CPU and memory.
    pub window: usize,
    /// Window for network in/out.
    pub network_window: usize,
    pub output_dir: PathBuf,
    /// Chart size overrides; unset fields fall back to `[chart]`.
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Default for ChirpstackConfig {
    fn default() -> Self {
        Self {
            rtt_file:         PathBuf::from("output/chirpstack_rtt.csv"),
            stats_file:       PathBuf::from("output/chirpstack_simulation_stats.csv"),
            container:        "chirpstack-1".to_string(),
            container_prefix: "chirpstack-docker-".to_string(),
            window:           6,
            network_window:   1,
            output_dir:       PathBuf::from("chirpstack_plots"),
            width:            Some(1600),
            height:           Some(1200),
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background color (hex, e.g. `"#ffffff"`).
    pub background: String,
    /// Axis and text color.
    pub foreground: String,
    /// Bar color for CPU, RTT and network charts.
    pub primary: String,
    /// Bar color for memory charts.
    pub secondary: String,
    pub font: String,
    pub font_size: f32,
    /// Upper bound of the CPU chart's y axis.
    pub cpu_max: f64,
    /// Upper bound of the memory chart's y axis.
    pub mem_max: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width:      800,
            height:     600,
            background: "#ffffff".to_string(),
            foreground: "#333333".to_string(),
            primary:    "#0000ff".to_string(),
            secondary:  "#ff0000".to_string(),
            font:       "sans-serif".to_string(),
            font_size:  12.0,
            cpu_max:    100.0,
            mem_max:    1000.0,
        }
    }
}

/// `simstat filter` defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// All rules must match for a row to be kept.
    pub rules: Vec<ColumnRule>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        use simstat_core::Comparison;

        Self {
            input:  PathBuf::from("transformed_gateway_with_jammer_status.csv"),
            output: PathBuf::from("filtered_output.csv"),
            rules:  vec![
                ColumnRule::new(2, Comparison::Eq, "202"),
                ColumnRule::new(7, Comparison::Lt, "14"),
            ],
        }
    }
}

/// `simstat count` defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountConfig {
    pub input: PathBuf,
    /// Zero-based column whose absolute value is compared.
    pub column: usize,
    pub threshold: f64,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            input:     PathBuf::from("output_anomalies.csv"),
            column:    2,
            threshold: 20.0,
        }
    }
}

/// `simstat devices` defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    pub count: usize,
    pub output: PathBuf,
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            count:  10_000,
            output: PathBuf::from("devices_augmented.csv"),
        }
    }
}

impl ChirpstackConfig {
    /// Effective chart size: per-run override, else the global chart size.
    pub fn chart_size(&self, chart: &ChartConfig) -> (u32, u32) {
        (
            self.width.unwrap_or(chart.width),
            self.height.unwrap_or(chart.height),
        )
    }
}
