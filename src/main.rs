//! simstat: analysis toolkit for the network-simulation captures.
//!
//! Run with:  `RUST_LOG=info simstat <command>`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simstat_config::{default_path, load as load_config};
use simstat_core::ColumnRule;
use simstat_pipeline::Pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Telemetry analysis for the network simulation", long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/simstat/simstat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-node CPU and memory charts
    Nodes,
    /// CPU and memory averaged across all nodes
    Overall,
    /// ChirpStack RTT, usage and network charts
    Chirpstack {
        /// RTT capture (overrides config)
        #[arg(long)]
        rtt: Option<PathBuf>,
        /// Container stats capture (overrides config)
        #[arg(long)]
        stats: Option<PathBuf>,
    },
    /// Moving average of one column of a CSV
    Smooth {
        #[arg(short, long)]
        input: PathBuf,
        /// Zero-based column index
        #[arg(short, long, default_value_t = 0)]
        column: usize,
        #[arg(short, long, default_value_t = 6)]
        window: usize,
        /// Write means here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Keep rows matching every rule
    Filter {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// `<column><op><value>`, e.g. `2==202` or `7<14` (repeatable)
        #[arg(short, long = "rule")]
        rules: Vec<ColumnRule>,
    },
    /// Count rows whose |value| is below / above a threshold
    Count {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        column: Option<usize>,
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Append random device credentials to a CSV
    Devices {
        #[arg(short = 'n', long)]
        count: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("simstat v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.unwrap_or_else(default_path);
    let mut config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Commands::Nodes => {
            let report = Pipeline::new(config).plot_nodes()?;
            tracing::info!("Wrote {} charts", report.charts.len());
        }
        Commands::Overall => {
            let report = Pipeline::new(config).plot_overall_average()?;
            tracing::info!("Wrote {} charts", report.charts.len());
        }
        Commands::Chirpstack { rtt, stats } => {
            if let Some(rtt) = rtt {
                config.chirpstack.rtt_file = rtt;
            }
            if let Some(stats) = stats {
                config.chirpstack.stats_file = stats;
            }
            let out = Pipeline::new(config).plot_chirpstack()?;
            println!("Total Network Input: {}", out.network_in_total);
            println!("Total Network Output: {}", out.network_out_total);
        }
        Commands::Smooth { input, column, window, output } => {
            let means = Pipeline::new(config)
                .smooth_column(&input, column, window, output.as_deref())
                .with_context(|| format!("smoothing {}", input.display()))?;
            if output.is_none() {
                for mean in means {
                    println!("{mean}");
                }
            }
        }
        Commands::Filter { input, output, rules } => {
            let input = input.unwrap_or(config.filter.input);
            let output = output.unwrap_or(config.filter.output);
            let rules = if rules.is_empty() { config.filter.rules } else { rules };
            simstat_filter::filter_file(&input, &output, &rules)
                .with_context(|| format!("filtering {}", input.display()))?;
        }
        Commands::Count { input, column, threshold } => {
            let input = input.unwrap_or(config.count.input);
            let threshold = threshold.unwrap_or(config.count.threshold);
            let count = simstat_filter::count_file(
                &input,
                column.unwrap_or(config.count.column),
                threshold,
            )
            .with_context(|| format!("counting {}", input.display()))?;
            println!("Number of values below {threshold}: {}", count.below);
            println!("Number of values above {threshold}: {}", count.above);
            if count.invalid > 0 {
                println!("Rows without a numeric value: {}", count.invalid);
            }
        }
        Commands::Devices { count, output } => {
            let output = output.unwrap_or(config.devices.output);
            let count = count.unwrap_or(config.devices.count);
            simstat_devices::append_devices(&output, count, &mut rand::rng())
                .with_context(|| format!("writing {}", output.display()))?;
        }
    }

    Ok(())
}
