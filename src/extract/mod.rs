//! Archive extraction with path-traversal protection.
//!
//! [`extract_archive`] dispatches on an [`ArchiveFormat`] resolved from the
//! archive's extension:
//! - `zip` is unpacked in-process on a blocking worker thread
//! - `lha` is handed to the external `lha` tool via [`LhaExtractor`]
//! - anything else fails with [`ExtractError::UnsupportedFormat`]
//!
//! The extractor never deletes its input; removing the archive after a
//! successful run is the caller's job.

mod error;
mod format;
mod lha;
mod zip;

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

pub use error::ExtractError;
pub use format::ArchiveFormat;
pub use lha::{LHA_BINARY, LhaExtractor};

/// Extraction settings shared by every archive in a run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Explicit `lha` binary; `None` searches `PATH` when an LHA archive shows up.
    pub lha_binary: Option<PathBuf>,
    /// Stops a running zip extraction between entries once cancelled.
    pub cancel: CancellationToken,
}

impl ExtractOptions {
    fn lha_extractor(&self) -> Result<LhaExtractor, ExtractError> {
        match &self.lha_binary {
            Some(path) => Ok(LhaExtractor::new(path)),
            None => LhaExtractor::from_path().ok_or_else(|| ExtractError::ToolUnavailable {
                tool: LHA_BINARY.to_string(),
                reason: "not found on PATH".to_string(),
            }),
        }
    }
}

/// Result of unpacking one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// Format that was used.
    pub format: ArchiveFormat,
    /// Directory the archive was unpacked into.
    pub target_dir: PathBuf,
    files: Vec<PathBuf>,
}

impl ExtractionOutcome {
    /// Paths of the regular files written.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    /// Number of regular files written.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Unpacks `archive_path` into `target_dir` using `format`.
///
/// # Errors
///
/// - [`ExtractError::UnsupportedFormat`] for [`ArchiveFormat::Unsupported`],
///   before touching the filesystem
/// - [`ExtractError::PathTraversal`] if any zip entry would land outside
///   `target_dir`; no entry is written in that case
/// - [`ExtractError::Corrupt`] if the container is unreadable or `lha` fails
/// - [`ExtractError::Cancelled`] if `options.cancel` fires mid-zip
/// - [`ExtractError::Io`] / [`ExtractError::ToolUnavailable`] otherwise
#[instrument(skip(options), fields(archive = %archive_path.display(), format = format.name()))]
pub async fn extract_archive(
    archive_path: &Path,
    target_dir: &Path,
    format: ArchiveFormat,
    options: &ExtractOptions,
) -> Result<ExtractionOutcome, ExtractError> {
    let files = match &format {
        ArchiveFormat::Zip => {
            let archive = archive_path.to_path_buf();
            let target = target_dir.to_path_buf();
            let cancel = options.cancel.clone();
            tokio::task::spawn_blocking(move || zip::extract_zip(&archive, &target, &cancel))
                .await
                .map_err(|e| {
                    ExtractError::corrupt(archive_path, format!("extraction task panicked: {e}"))
                })??
        }
        ArchiveFormat::Lha => {
            options
                .lha_extractor()?
                .extract(archive_path, target_dir)
                .await?
        }
        ArchiveFormat::Unsupported(extension) => {
            debug!(extension = %extension, "refusing unsupported archive");
            return Err(ExtractError::UnsupportedFormat {
                path: archive_path.to_path_buf(),
                extension: extension.clone(),
            });
        }
    };

    Ok(ExtractionOutcome {
        format,
        target_dir: target_dir.to_path_buf(),
        files,
    })
}
