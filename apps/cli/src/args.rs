//! # CLI Argument Definitions

use clap::{Parser, Subcommand, ValueEnum};
use fgate::Order;
use std::path::{Path, PathBuf};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "fgate")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Decide which features of a manifest may activate")]
pub struct Cli {
    /// Minimum log level (overrides `logging.level` from the manifest)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files (overrides `logging.dir` from the manifest)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve every feature and print the outcome (exit code 2 if any failed)
    Resolve {
        /// Path to the manifest (TOML, JSON, YAML, ...)
        manifest: PathBuf,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
        /// Listing order of the report
        #[arg(long, value_enum, default_value_t = OrderArg::Input)]
        order: OrderArg,
    },
    /// Validate a manifest without resolving it
    Check {
        /// Path to the manifest
        manifest: PathBuf,
    },
    /// Explain how a single feature resolved, or why it did not
    Explain {
        /// Path to the manifest
        manifest: PathBuf,
        /// Id of the feature to explain
        feature: String,
    },
}

impl Commands {
    pub fn manifest(&self) -> &Path {
        match self {
            Self::Resolve { manifest, .. } | Self::Check { manifest } | Self::Explain { manifest, .. } => manifest,
        }
    }
}

/// Report order accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Manifest declaration order
    Input,
    /// Declaration order reversed
    Reversed,
    /// Order in which features resolved
    Resolution,
}

impl From<OrderArg> for Order {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Input => Self::Input,
            OrderArg::Reversed => Self::Reversed,
            OrderArg::Resolution => Self::Resolution,
        }
    }
}
