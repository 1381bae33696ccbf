use crate::{Pipeline, Report};
use simstat_core::{finite, mean_across, Channel, Result, Series, SimError};
use simstat_telemetry::{format_mebibytes, read_node_usage, usage_path};
use tracing::info;

/// A CPU ceiling must be a positive number, or every sample scales to
/// `NaN` / infinity.
fn check_ceiling(ceiling: f64) -> Result<()> {
    if ceiling.is_finite() && ceiling > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidArgument(format!(
            "cpu_ceiling must be a positive number, got {ceiling}"
        )))
    }
}

impl Pipeline {
    /// CPU (smoothed, percent of ceiling) and memory charts for every node.
    pub fn plot_nodes(&self) -> Result<Report> {
        let cfg = &self.config.usage;
        let chart = &self.config.chart;
        let size = (chart.width, chart.height);
        let mut report = Report::default();
        check_ceiling(cfg.cpu_ceiling)?;

        for node in 1..=cfg.nodes {
            let usage = read_node_usage(usage_path(&cfg.input_dir, &cfg.file_pattern, node))?;
            let cpu = usage.cpu_percent(cfg.cpu_ceiling).smoothed(cfg.window)?;
            let memory = usage.memory_series();

            info!(
                "nc{node:02}: {} samples, peak memory {}",
                memory.len(),
                memory.peak().map_or_else(|| "n/a".to_string(), format_mebibytes)
            );

            self.chart(
                &mut report,
                &cpu,
                Some(chart.cpu_max),
                size,
                &cfg.output_dir,
                &format!("chart_cpu_nc{node:02}.svg"),
            )?;
            self.chart(
                &mut report,
                &memory,
                Some(chart.mem_max),
                size,
                &cfg.output_dir,
                &format!("chart_mem_nc{node:02}.svg"),
            )?;
        }

        Ok(report)
    }

    /// Smoothed CPU and raw memory averaged across all nodes.
    pub fn plot_overall_average(&self) -> Result<Report> {
        let cfg = &self.config.usage;
        let chart = &self.config.chart;
        if cfg.nodes == 0 {
            return Err(SimError::InvalidArgument("at least one node is required".into()));
        }
        check_ceiling(cfg.cpu_ceiling)?;

        let mut cpus = Vec::with_capacity(cfg.nodes as usize);
        let mut mems = Vec::with_capacity(cfg.nodes as usize);
        for node in 1..=cfg.nodes {
            let usage = read_node_usage(usage_path(&cfg.input_dir, &cfg.file_pattern, node))?;
            cpus.push(usage.cpu_percent(cfg.cpu_ceiling).smoothed(cfg.window)?.values);
            mems.push(usage.memory);
        }

        let cpu = Series::indexed(Channel::Cpu, finite(&mean_across(&cpus)));
        let memory = Series::indexed(Channel::Memory, finite(&mean_across(&mems)));
        info!(
            "Averaged {} nodes: {} CPU points, {} memory points",
            cfg.nodes,
            cpu.len(),
            memory.len()
        );

        let size = (chart.width, chart.height);
        let mut report = Report::default();
        self.chart(&mut report, &cpu, Some(chart.cpu_max), size, &cfg.output_dir, "chart_cpu_average.svg")?;
        self.chart(&mut report, &memory, Some(chart.mem_max), size, &cfg.output_dir, "chart_mem_average.svg")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use crate::Pipeline;
    use simstat_config::AnalysisConfig;
    use simstat_core::SimError;
    use std::path::Path;

    fn bars(path: &Path) -> usize {
        let doc = std::fs::read_to_string(path).unwrap();
        doc.matches("<rect").count() - 2
    }

    fn write_nodes(dir: &Path, rows: &[&str]) {
        for (i, body) in rows.iter().enumerate() {
            let path = dir.join(format!("nc{:02}_cpu_mem_usage.csv", i + 1));
            std::fs::write(path, format!("cpu,mem\n{body}")).unwrap();
        }
    }

    fn config(dir: &Path, nodes: u32) -> AnalysisConfig {
        let mut cfg = AnalysisConfig::default();
        cfg.usage.input_dir = dir.join("cpu_usages");
        cfg.usage.output_dir = dir.join("plots");
        cfg.usage.nodes = nodes;
        cfg.usage.window = 2;
        cfg
    }

    #[test]
    fn plots_every_node() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cpu_usages");
        std::fs::create_dir_all(&input).unwrap();
        write_nodes(&input, &["3,100\n6,110\n9,120\n", "30,200\n60,210\n"]);

        let report = Pipeline::new(config(dir.path(), 2)).plot_nodes().unwrap();
        assert_eq!(report.charts.len(), 4);
        for chart in &report.charts {
            assert!(chart.exists(), "{} missing", chart.display());
        }
        assert!(dir.path().join("plots/chart_mem_nc02.svg").exists());
    }

    #[test]
    fn missing_node_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("cpu_usages")).unwrap();
        assert!(Pipeline::new(config(dir.path(), 1)).plot_nodes().is_err());
    }

    #[test]
    fn average_over_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cpu_usages");
        std::fs::create_dir_all(&input).unwrap();
        write_nodes(&input, &["3,100\n6,110\n9,120\n", "30,200\n60,210\n"]);

        let report = Pipeline::new(config(dir.path(), 2)).plot_overall_average().unwrap();
        assert_eq!(report.charts.len(), 2);

        // node 1 cpu% [10,20,30] -> [15,25]; node 2 [100,100] -> [100]
        // mean -> [57.5, NaN] -> one bar
        assert_eq!(bars(&report.charts[0]), 1);
    }

    #[test]
    fn blank_cpu_samples_drop_their_windows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cpu_usages");
        std::fs::create_dir_all(&input).unwrap();
        // cpu% [10, NaN, 30, 40] -> means [NaN, NaN, 35]
        write_nodes(&input, &["3,100\n,110\n9,120\n12,130\n"]);

        let pipeline = Pipeline::new(config(dir.path(), 1));
        pipeline.plot_nodes().unwrap();
        assert_eq!(bars(&dir.path().join("plots/chart_cpu_nc01.svg")), 1);
        assert_eq!(bars(&dir.path().join("plots/chart_mem_nc01.svg")), 4);

        let report = pipeline.plot_overall_average().unwrap();
        assert_eq!(bars(&report.charts[0]), 1);
    }

    #[test]
    fn non_positive_ceiling_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for ceiling in [0.0, -5.0, f64::NAN] {
            let mut cfg = config(dir.path(), 1);
            cfg.usage.cpu_ceiling = ceiling;
            let pipeline = Pipeline::new(cfg);
            assert!(matches!(pipeline.plot_nodes(), Err(SimError::InvalidArgument(_))));
            assert!(matches!(
                pipeline.plot_overall_average(),
                Err(SimError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn zero_nodes_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Pipeline::new(config(dir.path(), 0)).plot_overall_average().is_err());
    }
}
