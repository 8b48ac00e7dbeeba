//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use fetch16c_core::ConflictPolicy;
use fetch16c_core::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use fetch16c_core::listing::DEFAULT_BASE_URL;

/// Fetch yearly art packs from 16colo.rs and unpack them locally.
///
/// For each year, counting back from the current one, fetch16c downloads
/// every listed pack into `<path>/<year>/` and extracts it into its own
/// `<path>/<year>/<pack>/` directory.
#[derive(Parser, Debug)]
#[command(name = "fetch16c")]
#[command(author, version, about)]
pub struct Args {
    /// Number of years to fetch, counting back from the current year (1-100)
    #[arg(short = 'y', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub years: u16,

    /// Root directory that receives one subdirectory per year
    #[arg(short = 'p', long)]
    pub path: PathBuf,

    /// What to do when a year's directory already exists
    #[arg(long, value_enum, default_value_t = ConflictArg::Skip)]
    pub on_conflict: ConflictArg,

    /// Base URL of the listing API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Connection timeout in seconds
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: u64,

    /// Overall per-request timeout in seconds
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=86400))]
    pub timeout: u64,

    /// Path to the `lha` binary (default: looked up on PATH)
    #[arg(long)]
    pub lha_binary: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the download progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// `--on-conflict` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    /// Leave the existing directory alone and move on to the next year
    Skip,
    /// Stop the run
    Abort,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(value: ConflictArg) -> Self {
        match value {
            ConflictArg::Skip => ConflictPolicy::Skip,
            ConflictArg::Abort => ConflictPolicy::Abort,
        }
    }
}
