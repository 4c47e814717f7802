//! Command-line interface for cmake-relink.
//!
//! # Commands
//!
//! - `sync` - rewrite out-of-date `target_link_libraries` statements
//! - `check` - like `sync --dry-run`, but exits non-zero when anything would change
//! - `show` - print what the tool knows about one target
//! - `graph` - print the link graph as Graphviz DOT
//!
//! # Global options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config <FILE>` - configuration file (also `CMAKE_RELINK_CONFIG`)
//!
//! Logging goes to stderr; `RUST_LOG` takes precedence over both flags.
//!
//! ```bash
//! cmake-relink sync --internal-prefix velox --exclude proto --exclude external
//! cmake-relink check ~/src/velox
//! cmake-relink show velox_exec --format json
//! cmake-relink graph --resolved | dot -Tsvg > links.svg
//! ```

mod check;
mod common;
mod graph;
mod show;
mod sync;

pub use common::ProjectArgs;
pub use show::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::constants::CONFIG_ENV_VAR;

/// Logging and configuration settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over [`log_level`](Self::log_level). Calling this twice
    /// is harmless; the second call does nothing.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init();
    }
}

/// Keep CMake `target_link_libraries` statements in sync with the includes
/// your sources actually use.
#[derive(Parser, Debug)]
#[command(name = "cmake-relink", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (default: cmake-relink.toml in the project directory)
    #[arg(long, global = true, env = CONFIG_ENV_VAR, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite out-of-date link statements
    Sync(sync::SyncCommand),
    /// Fail if any link statement is out of date
    Check(check::CheckCommand),
    /// Show the state of one target
    Show(show::ShowCommand),
    /// Print the link graph as Graphviz DOT
    Graph(graph::GraphCommand),
}

impl Cli {
    /// Settings derived from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn,cmake_relink=info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Set up logging and run the selected subcommand.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    /// Run the selected subcommand with already prepared settings.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        let config_path = config.config_path.as_deref();
        match self.command {
            Commands::Sync(cmd) => cmd.execute(config_path),
            Commands::Check(cmd) => cmd.execute(config_path),
            Commands::Show(cmd) => cmd.execute(config_path),
            Commands::Graph(cmd) => cmd.execute(config_path),
        }
    }
}
