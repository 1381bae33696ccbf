use crate::fields::{number_at, parse_number, parse_with_suffix};
use crate::{capture_reader, csv_error, open};
use chrono::{DateTime, Utc};
use simstat_core::{Channel, Result, Series};
use std::io::Read;
use std::path::Path;

/// One `docker stats` row: `timestamp_ms,container,cpu%,memMiB,net_in,net_out`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStat {
    /// `None` when the timestamp column isn't a valid millisecond epoch.
    pub at: Option<DateTime<Utc>>,
    /// Container name with the compose prefix removed.
    pub name: String,
    pub cpu: f64,
    /// MiB.
    pub memory: f64,
    pub net_in: f64,
    pub net_out: f64,
}

impl ContainerStat {
    /// `HH:MM` x-axis label.
    pub fn label(&self) -> String {
        self.at
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

pub fn read_container_stats(path: impl AsRef<Path>, prefix: &str) -> Result<Vec<ContainerStat>> {
    let path = path.as_ref();
    let stats = read_container_stats_from(open(path)?, prefix)?;
    tracing::debug!("{}: {} container rows", path.display(), stats.len());
    Ok(stats)
}

pub fn read_container_stats_from<R: Read>(reader: R, prefix: &str) -> Result<Vec<ContainerStat>> {
    capture_reader(reader)
        .records()
        .map(|record| {
            let record = record.map_err(csv_error)?;
            let field = |idx: usize| record.get(idx).unwrap_or_default();

            let name = field(1).trim();
            Ok(ContainerStat {
                at: parse_timestamp(field(0)),
                name: name.strip_prefix(prefix).unwrap_or(name).to_string(),
                cpu: parse_with_suffix(field(2), "%"),
                memory: parse_with_suffix(field(3), "MiB"),
                net_in: number_at(&record, 4),
                net_out: number_at(&record, 5),
            })
        })
        .collect()
}

fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    let ms = parse_number(field);
    if !ms.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms.round() as i64)
}

/// Per-channel sequences of a single container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSeries {
    pub labels: Vec<String>,
    pub cpu: Vec<f64>,
    pub memory: Vec<f64>,
    /// Network counters with the first (baseline) sample dropped.
    pub net_in: Vec<f64>,
    pub net_out: Vec<f64>,
}

impl ContainerSeries {
    /// Collect the rows belonging to `container`, in capture order.
    pub fn collect(stats: &[ContainerStat], container: &str) -> Self {
        let mut out = Self::default();
        for stat in stats.iter().filter(|s| s.name == container) {
            out.labels.push(stat.label());
            out.cpu.push(stat.cpu);
            out.memory.push(stat.memory);
            out.net_in.push(stat.net_in);
            out.net_out.push(stat.net_out);
        }

        if !out.net_in.is_empty() {
            out.net_in.remove(0);
            out.net_out.remove(0);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }

    /// Series for `channel`; `None` for channels `docker stats` doesn't
    /// report (RTT).
    pub fn series(&self, channel: Channel) -> Option<Series> {
        let values = match channel {
            Channel::Cpu => &self.cpu,
            Channel::Memory => &self.memory,
            Channel::NetworkIn => &self.net_in,
            Channel::NetworkOut => &self.net_out,
            Channel::Rtt => return None,
        };
        Some(Series::with_labels(channel, self.labels.clone(), values.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPTURE: &str = "\
tmst,name,cpu,mem,ni,no
1719498319623,chirpstack-docker-chirpstack-1,12.5%,100MiB,10,20
1719498319623,chirpstack-docker-postgres-1,1.0%,50MiB,1,1
1719498379623,chirpstack-docker-chirpstack-1,7.5%,110.5MiB,30,40
1719498439623,chirpstack-docker-chirpstack-1,n/a,120MiB,50,60
";

    #[test]
    fn strips_units_and_prefix() {
        let stats = read_container_stats_from(CAPTURE.as_bytes(), "chirpstack-docker-").unwrap();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0].name, "chirpstack-1");
        assert_eq!(stats[1].name, "postgres-1");
        assert_eq!(stats[0].cpu, 12.5);
        assert_eq!(stats[2].memory, 110.5);
        assert!(stats[3].cpu.is_nan());
        assert_eq!(stats[0].label(), "14:25");
    }

    #[test]
    fn collects_one_container_and_drops_network_baseline() {
        let stats = read_container_stats_from(CAPTURE.as_bytes(), "chirpstack-docker-").unwrap();
        let series = ContainerSeries::collect(&stats, "chirpstack-1");
        assert_eq!(series.labels.len(), 3);
        assert_eq!(series.memory, vec![100.0, 110.5, 120.0]);
        assert_eq!(series.net_in, vec![30.0, 50.0]);
        assert_eq!(series.net_out, vec![40.0, 60.0]);
        assert_eq!(series.series(Channel::NetworkIn).map(|s| s.values.len()), Some(2));
    }

    #[test]
    fn rtt_is_not_a_container_channel() {
        let stats = read_container_stats_from(CAPTURE.as_bytes(), "chirpstack-docker-").unwrap();
        let series = ContainerSeries::collect(&stats, "chirpstack-1");
        assert!(series.series(Channel::Rtt).is_none());
        assert!(series.series(Channel::Cpu).is_some());
    }

    #[test]
    fn bad_timestamp_has_no_time() {
        let stats = read_container_stats_from("h\nsoon,x,1%,1MiB,0,0\n".as_bytes(), "").unwrap();
        assert_eq!(stats[0].at, None);
        assert_eq!(stats[0].label(), "?");
    }

    #[test]
    fn unknown_container_is_empty() {
        let stats = read_container_stats_from(CAPTURE.as_bytes(), "chirpstack-docker-").unwrap();
        assert!(ContainerSeries::collect(&stats, "redis-1").is_empty());
    }
}
