//! Error taxonomy for the orchestrator.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;
use crate::extract::ExtractError;
use crate::listing::ListingError;

/// Coarse failure category used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Listing fetch or download transport failure.
    Network,
    /// Malformed listing payload.
    Decode,
    /// Directory/file creation, rename or permission failure.
    Filesystem,
    /// Unrecognized archive extension.
    UnsupportedFormat,
    /// Unreadable container or failed external unpacker.
    CorruptArchive,
    /// Archive entry would escape its target directory.
    PathTraversal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Network => "network",
            Self::Decode => "decode",
            Self::Filesystem => "filesystem",
            Self::UnsupportedFormat => "unsupported format",
            Self::CorruptArchive => "corrupt archive",
            Self::PathTraversal => "path traversal",
        };
        f.write_str(label)
    }
}

impl ListingError {
    /// Category of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }
}

impl DownloadError {
    /// Category of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        if self.is_filesystem() {
            ErrorKind::Filesystem
        } else {
            ErrorKind::Network
        }
    }
}

impl ExtractError {
    /// Category of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::Corrupt { .. } | Self::ToolUnavailable { .. } => ErrorKind::CorruptArchive,
            Self::PathTraversal { .. } => ErrorKind::PathTraversal,
            Self::Io { .. } | Self::Cancelled { .. } => ErrorKind::Filesystem,
        }
    }
}

/// Why a single pack could not be processed.
#[derive(Debug, Error)]
pub enum PackError {
    /// Fetching the archive failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Unpacking the archive failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Creating the pack directory failed.
    #[error("failed to create pack directory {path}: {source}")]
    Filesystem {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl PackError {
    /// Category of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Download(e) => e.kind(),
            Self::Extract(e) => e.kind(),
            Self::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }
}

/// Failures that end the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The root output directory cannot be created or is not a directory.
    #[error("root output path {path} is not usable: {source}")]
    RootInaccessible {
        /// The configured root.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A year directory already existed and the policy is to abort.
    #[error("directory for {year} already exists at {path}")]
    YearConflict {
        /// Conflicting year.
        year: i32,
        /// The pre-existing directory.
        path: PathBuf,
    },

    /// The shared HTTP client could not be built.
    #[error(transparent)]
    HttpClient(#[from] DownloadError),
}
