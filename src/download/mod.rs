//! Streaming file fetcher with atomic placement.
//!
//! This module downloads archives from HTTP/HTTPS URLs straight to disk.
//!
//! # Features
//!
//! - Streaming downloads (the body is never buffered whole in memory)
//! - Atomic placement: bytes land in `<destination>.part` and are renamed
//!   into place only after a complete transfer
//! - Throttled byte-count progress through [`DownloadProgress`]
//! - Configurable timeouts (30s connect, 5min per request by default)
//!
//! # Example
//!
//! ```no_run
//! use fetch16c_core::download::{HttpClient, NoProgress};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let bytes = client
//!     .fetch_to_file(
//!         "https://16colo.rs/archive/1996/acid-50a.zip",
//!         Path::new("./art/1996/acid-50a.zip"),
//!         &NoProgress,
//!     )
//!     .await?;
//! println!("Fetched {bytes} bytes");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;
pub mod filename;
mod progress;

pub use client::{DownloadTask, HttpClient};
pub use error::DownloadError;
pub use progress::{DownloadProgress, NoProgress, format_bytes};
