//! Analysis pipelines for the simulation captures.
//!
//! Each public method on [`Pipeline`] is one run-once analysis:
//! - per-node CPU / memory charts
//! - CPU / memory averaged over every node
//! - ChirpStack RTT, container usage and network totals
//! - moving average of an arbitrary CSV column
//!
//! Nothing runs until the caller invokes a method.

mod chirpstack;
mod smooth;
mod usage;

pub use chirpstack::ChirpstackReport;

use simstat_chart::BarChart;
use simstat_config::AnalysisConfig;
use simstat_core::{Result, Series};
use simstat_theme::Theme;
use std::path::{Path, PathBuf};

/// Files produced by a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub charts: Vec<PathBuf>,
}

/// Loaded configuration plus the theme compiled from it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
    theme:  Theme,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        let theme = Theme::from_config(&config.chart);
        Self { config, theme }
    }

    /// Render `series` to `dir/name` and record it in `report`.
    fn chart(
        &self,
        report: &mut Report,
        series: &Series,
        y_max: Option<f64>,
        size: (u32, u32),
        dir: &Path,
        name: &str,
    ) -> Result<()> {
        let mut chart = BarChart::from_series(series, &self.theme);
        if let Some(max) = y_max {
            chart = chart.with_y_range(0.0, max);
        }

        let path = dir.join(name);
        chart.write_svg(&path, &self.theme.canvas(), size.0, size.1)?;
        report.charts.push(path);
        Ok(())
    }
}
