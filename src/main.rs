//! CLI entry point for fetch16c.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use fetch16c_core::{PROJECT_URL, Pipeline, RunConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

mod app;
mod cli;

use app::exit_handler::determine_exit_outcome;
use app::progress_manager::{ConsolePrinter, TerminalProgress, summary_line};
use app::terminal;
use cli::Args;

/// Process outcome, mapped onto the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Nothing failed.
    Success,
    /// Some packs or years failed, at least one pack was extracted.
    Partial,
    /// Everything attempted failed, or the run aborted.
    Failure,
    /// Interrupted by Ctrl-C.
    Interrupted,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
            Self::Interrupted => 130,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(value: ProcessExit) -> Self {
        ExitCode::from(value.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            error!(error = %e, "fetch16c failed");
            eprintln!("Error: {e:#}");
            ProcessExit::Failure.into()
        }
    }
}

async fn run() -> Result<ProcessExit> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let dumb_terminal = terminal::is_dumb_terminal();
    let no_color = terminal::should_disable_color(terminal::no_color_env_requested(), dumb_terminal);
    terminal::init_tracing(terminal::default_log_level(args.quiet, args.verbose), no_color);
    debug!(?args, "CLI arguments parsed");

    if !args.quiet {
        println!("Fetch16c {}", env!("CARGO_PKG_VERSION"));
        println!("{PROJECT_URL}");
    }

    let use_progress = terminal::should_use_progress(
        std::io::stderr().is_terminal(),
        args.quiet,
        args.no_progress,
        dumb_terminal,
    );

    let cancel = CancellationToken::new();
    let mut pipeline = Pipeline::new(build_config(&args))?
        .with_observer(Arc::new(ConsolePrinter::new(args.quiet)))
        .with_cancel_token(cancel.clone());
    if use_progress {
        pipeline = pipeline.with_progress(Arc::new(TerminalProgress::new()));
    }

    // Dropping the run future on Ctrl-C drops any in-flight download (whose
    // guard removes the partial file) and kills a running `lha`. A zip being
    // unpacked on a blocking thread stops at its next entry.
    let result = tokio::select! {
        result = pipeline.run() => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            warn!("interrupted, stopping");
            eprintln!("Interrupted");
            return Ok(ProcessExit::Interrupted);
        }
    };

    match result {
        Ok(summary) => {
            if !args.quiet {
                println!("{}", summary_line(&summary));
            }
            Ok(determine_exit_outcome(&summary))
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            eprintln!("Error: {e}");
            Ok(ProcessExit::Failure)
        }
    }
}

fn build_config(args: &Args) -> RunConfig {
    let mut config = RunConfig::new(args.path.clone(), args.years);
    config.conflict_policy = args.on_conflict.into();
    config.api_base_url.clone_from(&args.api_base_url);
    config.connect_timeout = Duration::from_secs(args.connect_timeout);
    config.request_timeout = Duration::from_secs(args.timeout);
    config.extract.lha_binary.clone_from(&args.lha_binary);
    config
}
