//! Fetch16c Core Library
//!
//! Retrieves yearly art-pack listings from the 16colo.rs API, downloads each
//! referenced archive and unpacks it into a per-pack directory.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`listing`] - Year listing client for the remote pack index
//! - [`download`] - Streaming file fetcher with atomic placement
//! - [`extract`] - Zip/LHA extraction with path-traversal protection
//! - [`pipeline`] - Per-year, per-pack orchestration and failure reporting

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod extract;
pub mod listing;
pub mod pipeline;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use download::{
    DownloadError, DownloadProgress, DownloadTask, HttpClient, NoProgress, format_bytes,
};
pub use extract::{ArchiveFormat, ExtractError, ExtractOptions, ExtractionOutcome, extract_archive};
pub use listing::{ListingClient, ListingError, PackEntry, YearListing};
pub use pipeline::{
    ConflictPolicy, ErrorKind, PackFailure, Pipeline, PipelineError, RunConfig, RunObserver,
    SilentObserver, Summary, YearOutcome, YearReport, years_to_process,
};
pub use user_agent::PROJECT_URL;
