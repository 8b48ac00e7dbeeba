//! Constants for the download module (timeouts, temp naming, progress cadence).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default overall per-request timeout (5 minutes for large archives).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Suffix appended to the destination path while a transfer is in flight.
pub const TEMP_SUFFIX: &str = ".part";

/// Minimum spacing between progress callbacks during a transfer.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);
