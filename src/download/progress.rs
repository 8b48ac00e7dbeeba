//! Progress reporting seam for streaming transfers.
//!
//! The fetcher only knows about [`DownloadProgress`]; terminal rendering lives
//! in the binary so the library stays silent by default.

use std::time::{Duration, Instant};

use indicatif::DecimalBytes;

/// Receives byte-count progress for one transfer at a time.
pub trait DownloadProgress: Send + Sync {
    /// Called once before the first byte is written.
    fn on_start(&self, label: &str, total_bytes: Option<u64>);

    /// Called with the cumulative number of bytes written so far.
    fn on_advance(&self, bytes_written: u64);

    /// Called once when the transfer ends, successfully or not.
    fn on_finish(&self);
}

/// Progress sink that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {
    fn on_start(&self, _label: &str, _total_bytes: Option<u64>) {}

    fn on_advance(&self, _bytes_written: u64) {}

    fn on_finish(&self) {}
}

/// Rate limiter for progress callbacks.
#[derive(Debug)]
pub(crate) struct ProgressThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl ProgressThrottle {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true when enough time has passed since the last report.
    pub(crate) fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Formats a byte count with decimal units, e.g. `12.30 MB`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    DecimalBytes(bytes).to_string()
}
