//! Error types for archive extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while unpacking an archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The archive's extension is neither `zip` nor `lha`.
    #[error("unsupported archive format '{extension}' for {path}")]
    UnsupportedFormat {
        /// The archive path.
        path: PathBuf,
        /// Lower-cased extension (empty when the file has none).
        extension: String,
    },

    /// The container could not be read, or the external tool reported failure.
    #[error("corrupt archive {archive}: {reason}")]
    Corrupt {
        /// The archive path.
        archive: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// An entry would be written outside the target directory.
    #[error("archive {archive} entry '{entry}' escapes the target directory")]
    PathTraversal {
        /// The archive path.
        archive: PathBuf,
        /// The offending stored entry name.
        entry: String,
    },

    /// Creating a directory or writing an extracted file failed.
    #[error("IO error extracting to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Extraction was interrupted; files written so far are left in place.
    #[error("extraction of {archive} cancelled")]
    Cancelled {
        /// The archive path.
        archive: PathBuf,
    },

    /// The external unpacking tool could not be started.
    #[error("{tool} is not available: {reason}")]
    ToolUnavailable {
        /// Tool name or path.
        tool: String,
        /// Why it could not be started.
        reason: String,
    },
}

impl ExtractError {
    /// Creates a corrupt-archive error.
    pub fn corrupt(archive: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            archive: archive.into(),
            reason: reason.into(),
        }
    }

    /// Creates a path traversal error.
    pub fn path_traversal(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self::PathTraversal {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
