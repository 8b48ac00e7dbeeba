//! Fetch-download-extract orchestration.
//!
//! The [`Pipeline`] walks the configured years (most recent first), and for
//! each one:
//! 1. Fetches the year listing; on failure the year is skipped
//! 2. Creates `root/<year>/`; an existing directory is a conflict
//! 3. For every pack, in listing order: creates `root/<year>/<pack>/`,
//!    fetches the archive into `root/<year>/<archive>`, extracts it into the
//!    pack directory and deletes the archive
//! 4. Reports the year's failed packs
//!
//! A failing pack never stops its year and a failing year never stops the
//! run. Only an unusable root directory, or a year conflict under
//! [`ConflictPolicy::Abort`], ends the run early.
//!
//! # Example
//!
//! ```no_run
//! use fetch16c_core::pipeline::{Pipeline, RunConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(RunConfig::new("art", 2))?;
//! let summary = pipeline.run().await?;
//! println!("extracted {}, failed {}", summary.extracted_count(), summary.failed_count());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod report;

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::download::{DownloadProgress, HttpClient, NoProgress};
use crate::extract::{ArchiveFormat, ExtractError, ExtractionOutcome, extract_archive};
use crate::listing::{ListingClient, PackEntry};

pub use config::{ConflictPolicy, RunConfig, years_to_process};
pub use error::{ErrorKind, PackError, PipelineError};
pub use report::{PackFailure, Summary, YearOutcome, YearReport};

/// Hooks for surfacing progress to the operator while a run is underway.
///
/// Every method has a no-op default.
pub trait RunObserver: Send + Sync {
    /// The listing for `year` was fetched.
    fn year_started(&self, _year: i32, _packs: usize) {}

    /// A pack was fetched and extracted.
    fn pack_extracted(&self, _year: i32, _entry: &PackEntry, _outcome: &ExtractionOutcome) {}

    /// A pack failed.
    fn pack_failed(&self, _year: i32, _failure: &PackFailure) {}

    /// All packs of a year were attempted, or the year was skipped.
    fn year_finished(&self, _report: &YearReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Drives listing, download and extraction for a set of years.
pub struct Pipeline {
    config: RunConfig,
    http: HttpClient,
    listing: ListingClient,
    progress: Arc<dyn DownloadProgress>,
    observer: Arc<dyn RunObserver>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Creates a pipeline with a fresh HTTP client built from `config`'s timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: RunConfig) -> Result<Self, PipelineError> {
        let http = HttpClient::with_timeouts(config.connect_timeout, config.request_timeout)?;
        let listing = ListingClient::with_base_url(&http, config.api_base_url.clone());
        Ok(Self {
            config,
            http,
            listing,
            progress: Arc::new(NoProgress),
            observer: Arc::new(SilentObserver),
        })
    }

    /// Sets the sink that receives byte-count progress for each download.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn DownloadProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the observer notified of pack and year results.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Shares `cancel` with the extractor, so a zip being unpacked stops at
    /// its next entry once the token fires.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.config.extract.cancel = cancel;
        self
    }

    /// Processes every configured year in order.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::RootInaccessible`] if the root cannot be created
    /// - [`PipelineError::YearConflict`] if a year directory exists and the
    ///   policy is [`ConflictPolicy::Abort`]
    #[instrument(skip(self), fields(root = %self.config.root.display(), years_back = self.config.years_back))]
    pub async fn run(&self) -> Result<Summary, PipelineError> {
        self.prepare_root()?;

        let mut summary = Summary::default();
        for year in self.config.years() {
            let report = self.process_year(year).await?;
            self.observer.year_finished(&report);
            summary.years.push(report);
        }

        info!(
            years = summary.years.len(),
            extracted = summary.extracted_count(),
            failed = summary.failed_count(),
            skipped_years = summary.skipped_years(),
            "run complete"
        );
        Ok(summary)
    }

    fn prepare_root(&self) -> Result<(), PipelineError> {
        let root = &self.config.root;
        let inaccessible = |source| PipelineError::RootInaccessible {
            path: root.clone(),
            source,
        };
        std::fs::create_dir_all(root).map_err(inaccessible)?;
        let metadata = std::fs::metadata(root).map_err(inaccessible)?;
        if !metadata.is_dir() {
            return Err(inaccessible(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn process_year(&self, year: i32) -> Result<YearReport, PipelineError> {
        let listing = match self.listing.fetch_year_listing(year).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(year, error = %e, "skipping year: listing unavailable");
                return Ok(YearReport::skipped(year, e.kind(), e.to_string()));
            }
        };

        let year_dir = self.config.root.join(year.to_string());
        match std::fs::create_dir(&year_dir) {
            Ok(()) => debug!(path = %year_dir.display(), "created year directory"),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return match self.config.conflict_policy {
                    ConflictPolicy::Skip => {
                        warn!(year, path = %year_dir.display(), "skipping year: directory already exists");
                        Ok(YearReport::skipped(
                            year,
                            ErrorKind::Filesystem,
                            format!("directory already exists: {}", year_dir.display()),
                        ))
                    }
                    ConflictPolicy::Abort => Err(PipelineError::YearConflict {
                        year,
                        path: year_dir,
                    }),
                };
            }
            Err(e) => {
                warn!(year, path = %year_dir.display(), error = %e, "skipping year: cannot create directory");
                return Ok(YearReport::skipped(
                    year,
                    ErrorKind::Filesystem,
                    format!("failed to create {}: {e}", year_dir.display()),
                ));
            }
        }

        info!(year, packs = listing.len(), "processing year");
        self.observer.year_started(year, listing.len());

        let mut report = YearReport::processed(year, listing.len());
        for entry in &listing.entries {
            match self.process_pack(&year_dir, entry).await {
                Ok(outcome) => {
                    info!(year, pack = %entry.name, files = outcome.file_count(), "extracted archive");
                    self.observer.pack_extracted(year, entry, &outcome);
                    report.extracted.push(entry.name.clone());
                }
                Err(e) => {
                    warn!(year, pack = %entry.name, kind = %e.kind(), error = %e, "pack failed");
                    let failure = PackFailure {
                        name: entry.name.clone(),
                        kind: e.kind(),
                        reason: e.to_string(),
                    };
                    self.observer.pack_failed(year, &failure);
                    report.failures.push(failure);
                }
            }
        }

        if report.failures.is_empty() {
            info!(year, extracted = report.extracted.len(), "year complete");
        } else {
            let failed: Vec<&str> = report.failed_names().collect();
            warn!(
                year,
                extracted = report.extracted.len(),
                failed = ?failed,
                "year complete with failures"
            );
        }
        Ok(report)
    }

    #[instrument(skip(self, year_dir, entry), fields(pack = %entry.name))]
    async fn process_pack(
        &self,
        year_dir: &Path,
        entry: &PackEntry,
    ) -> Result<ExtractionOutcome, PackError> {
        let archive_path = year_dir.join(&entry.archive_filename);
        let format = ArchiveFormat::from_path(&archive_path);
        if let ArchiveFormat::Unsupported(extension) = &format {
            return Err(ExtractError::UnsupportedFormat {
                path: archive_path.clone(),
                extension: extension.clone(),
            }
            .into());
        }

        let pack_dir = year_dir.join(entry.dir_name());
        std::fs::create_dir_all(&pack_dir).map_err(|source| PackError::Filesystem {
            path: pack_dir.clone(),
            source,
        })?;

        let bytes = match self
            .http
            .fetch_to_file(&entry.download_url, &archive_path, self.progress.as_ref())
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                remove_if_empty(&pack_dir);
                return Err(e.into());
            }
        };
        match entry.declared_size {
            Some(declared) if declared != bytes => {
                debug!(declared, received = bytes, "archive size differs from listing");
            }
            _ => debug!(bytes, "archive downloaded"),
        }

        let outcome = match extract_archive(&archive_path, &pack_dir, format, &self.config.extract).await {
            Ok(outcome) => outcome,
            Err(e) => {
                remove_if_empty(&pack_dir);
                return Err(e.into());
            }
        };

        for file in outcome.files() {
            debug!(path = %file.display(), "extracted file");
        }
        if let Err(e) = std::fs::remove_file(&archive_path) {
            warn!(path = %archive_path.display(), error = %e, "failed to delete archive after extraction");
        }
        Ok(outcome)
    }
}

/// Best-effort removal of a pack directory that a failed attempt left empty.
fn remove_if_empty(dir: &Path) {
    if std::fs::remove_dir(dir).is_ok() {
        debug!(path = %dir.display(), "removed empty pack directory");
    }
}
