//! Error types for the listing client.

use thiserror::Error;

/// Errors that can occur while retrieving a year listing.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Transport failure (DNS, connection refused, timeout, dropped body).
    #[error("network error fetching listing for {year} from {url}: {source}")]
    Network {
        /// Requested year.
        year: i32,
        /// Listing endpoint URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} fetching listing for {year} from {url}")]
    HttpStatus {
        /// Requested year.
        year: i32,
        /// Listing endpoint URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The body could not be decoded into the listing shape.
    #[error("failed to decode listing for {year} from {url}: {source}")]
    Decode {
        /// Requested year.
        year: i32,
        /// Listing endpoint URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
