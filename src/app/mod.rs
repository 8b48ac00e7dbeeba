//! Binary-side plumbing: terminal setup, console output and exit codes.

pub(crate) mod exit_handler;
pub(crate) mod progress_manager;
pub(crate) mod terminal;
