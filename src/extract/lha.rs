//! LHA extraction through the external `lha` binary.
//!
//! The LZH compression family is not reimplemented here; `lha x -w<dir>` is
//! run with the pack directory as its working target.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::error::ExtractError;

/// Default binary name searched on `PATH`.
pub const LHA_BINARY: &str = "lha";

/// Runs the external `lha` tool.
#[derive(Debug, Clone)]
pub struct LhaExtractor {
    binary_path: PathBuf,
}

impl LhaExtractor {
    /// Creates an extractor with an explicit binary path.
    #[must_use]
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Attempts to find `lha` on `PATH`.
    #[must_use]
    pub fn from_path() -> Option<Self> {
        which::which(LHA_BINARY).ok().map(Self::new)
    }

    /// Unpacks `archive_path` into `target_dir`, returning the files found
    /// there afterwards.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::ToolUnavailable`] if the binary cannot be started
    /// - [`ExtractError::Corrupt`] if it exits unsuccessfully
    /// - [`ExtractError::Io`] if `target_dir` cannot be created or listed
    ///
    /// Dropping the returned future kills a still-running `lha`.
    pub async fn extract(
        &self,
        archive_path: &Path,
        target_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExtractError> {
        debug!(binary = %self.binary_path.display(), ?archive_path, ?target_dir, "running lha");

        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| ExtractError::io(target_dir, e))?;

        let mut work_dir_flag = OsString::from("-w");
        work_dir_flag.push(target_dir.as_os_str());

        let output = Command::new(&self.binary_path)
            .arg("x")
            .arg(work_dir_flag)
            .arg(archive_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExtractError::ToolUnavailable {
                tool: self.binary_path.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match output.status.code() {
                Some(code) => format!("lha exited with status {code}: {}", stderr.trim()),
                None => format!("lha terminated by signal: {}", stderr.trim()),
            };
            return Err(ExtractError::corrupt(archive_path, reason));
        }

        let target = target_dir.to_path_buf();
        let files = tokio::task::spawn_blocking(move || list_files(&target))
            .await
            .map_err(|e| ExtractError::corrupt(archive_path, format!("listing task failed: {e}")))??;

        info!(
            ?archive_path,
            extracted_count = files.len(),
            "LHA extraction successful"
        );
        Ok(files)
    }
}

/// Recursively lists regular files under `root`, sorted for stable output.
fn list_files(root: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ExtractError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
