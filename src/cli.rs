use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::collector::DEFAULT_CONCURRENCY;
use crate::pipeline::{PipelineConfig, DEFAULT_SYSTEMS};
use crate::upstream::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "uex-destinations")]
#[command(version, about = "Build destination and commodity snapshots from the UEX API")]
pub struct Cli {
    /// UEX API base URL
    #[arg(long, global = true, env = "UEX_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory the snapshot files are written to
    #[arg(short, long, global = true, env = "UEX_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Star systems to aggregate (comma-separated)
    #[arg(
        short,
        long = "system",
        global = true,
        env = "UEX_SYSTEMS",
        value_delimiter = ',',
        default_values_t = DEFAULT_SYSTEMS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub systems: Vec<String>,

    /// Max concurrent POI requests per fetch group
    #[arg(short, long, global = true, env = "UEX_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Refresh commodities and destinations (default)
    Sync,

    /// Refresh resources.json and the dated commodity audit file
    Commodities,

    /// Refresh destinations.json
    Destinations,

    /// Recompute the total in an existing destinations.json without fetching
    Recount,

    /// List upstream star systems and mark the selected ones
    ListSystems,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Sync)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            systems: self
                .systems
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            concurrency: self.concurrency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_sync() {
        let cli = Cli::try_parse_from(["uex-destinations"]).unwrap();
        assert_eq!(cli.command(), Commands::Sync);
        assert_eq!(cli.pipeline_config().systems, vec!["Stanton", "Pyro"]);
        assert_eq!(cli.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_systems_and_subcommand() {
        let cli = Cli::try_parse_from([
            "uex-destinations",
            "destinations",
            "--system",
            "Pyro, Nyx",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.command(), Commands::Destinations);
        assert_eq!(cli.pipeline_config().systems, vec!["Pyro", "Nyx"]);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }
}
