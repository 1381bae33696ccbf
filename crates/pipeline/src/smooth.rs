use crate::Pipeline;
use simstat_core::{moving_average, Result};
use simstat_telemetry::read_column;
use std::path::Path;
use tracing::info;

impl Pipeline {
    /// Moving average of one column of a headed CSV.  When `output` is set
    /// the means are also written there, one per line.
    pub fn smooth_column(
        &self,
        input: &Path,
        column: usize,
        window: usize,
        output: Option<&Path>,
    ) -> Result<Vec<f64>> {
        let values = read_column(input, column)?;
        let means = moving_average(&values, window)?;
        info!(
            "{}: column {column}, {} samples -> {} means (window {window})",
            input.display(),
            values.len(),
            means.len()
        );

        if let Some(path) = output {
            let body: String = means.iter().map(|m| format!("{m}\n")).collect();
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, body)?;
        }

        Ok(means)
    }
}
