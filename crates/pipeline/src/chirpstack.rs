use crate::{Pipeline, Report};
use simstat_core::{total, Channel, Result};
use simstat_telemetry::{read_container_stats, read_rtt, ContainerSeries};
use tracing::{info, warn};

/// Charts written plus the network totals of the charted container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChirpstackReport {
    pub report: Report,
    pub network_in_total: f64,
    pub network_out_total: f64,
}

impl Pipeline {
    /// RTT chart plus CPU, memory and network charts of one container.
    pub fn plot_chirpstack(&self) -> Result<ChirpstackReport> {
        let cfg = &self.config.chirpstack;
        let size = cfg.chart_size(&self.config.chart);
        let dir = &cfg.output_dir;
        let mut report = Report::default();

        // ── Round-trip times ──────────────────────────────────────────────────
        let rtt = read_rtt(&cfg.rtt_file)?.series().smoothed(cfg.window)?;
        self.chart(&mut report, &rtt, None, size, dir, "rtts.svg")?;

        // ── Container usage ───────────────────────────────────────────────────
        let stats = read_container_stats(&cfg.stats_file, &cfg.container_prefix)?;
        let container = ContainerSeries::collect(&stats, &cfg.container);
        if container.is_empty() {
            warn!(
                "No rows for container '{}' in {}",
                cfg.container,
                cfg.stats_file.display()
            );
        }

        let charts = [
            (Channel::Cpu, cfg.window, Some(self.config.chart.cpu_max), "cpu.svg"),
            (Channel::NetworkIn, cfg.network_window, None, "ni.svg"),
            (Channel::NetworkOut, cfg.network_window, None, "no.svg"),
            (Channel::Memory, cfg.window, None, "mem.svg"),
        ];
        for (channel, window, y_max, name) in charts {
            let Some(series) = container.series(channel) else {
                continue;
            };
            self.chart(&mut report, &series.smoothed(window)?, y_max, size, dir, name)?;
        }

        let network_in_total = total(&container.net_in);
        let network_out_total = total(&container.net_out);
        info!("Total Network Input: {network_in_total}");
        info!("Total Network Output: {network_out_total}");

        Ok(ChirpstackReport { report, network_in_total, network_out_total })
    }
}
