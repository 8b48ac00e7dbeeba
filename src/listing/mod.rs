//! Year listing client for the 16colo.rs pack index.
//!
//! [`ListingClient::fetch_year_listing`] calls `GET {base}/year/{year}` and
//! decodes the response into a [`YearListing`]. Only `name`, `download`,
//! `archive` and `size` are read from each result; a `null` page or result
//! set decodes as an empty year.

mod error;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::download::HttpClient;
use crate::download::filename::{filename_from_url, sanitize_filename};

pub use error::ListingError;

/// Default listing API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.16colo.rs/v1";

// ==================== API Response Types ====================

/// Top-level `/year/{year}` response.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    page: Option<PageInfo>,
    #[serde(default)]
    results: Option<Vec<ListingResult>>,
}

/// Paging metadata returned alongside the results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    /// Total number of packs the API advertises for the year.
    pub total: u64,
    /// Current page number.
    pub page: u64,
    /// Number of pages.
    pub pages: u64,
}

/// One entry of the `results` array.
#[derive(Debug, Deserialize)]
struct ListingResult {
    name: String,
    download: String,
    #[serde(default)]
    archive: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

// ==================== Domain Types ====================

/// One downloadable art pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Pack name, used as the pack directory name.
    pub name: String,
    /// Archive download URL.
    pub download_url: String,
    /// Archive filename on disk (from `archive`, else the URL's last segment).
    pub archive_filename: String,
    /// Size advertised by the API, when present.
    pub declared_size: Option<u64>,
}

impl PackEntry {
    /// Directory name for this pack, safe to join onto the year directory.
    #[must_use]
    pub fn dir_name(&self) -> String {
        sanitize_filename(&self.name)
    }

    fn from_result(result: ListingResult) -> Self {
        let archive_filename =
            resolve_archive_filename(result.archive.as_deref(), &result.download, &result.name);
        Self {
            name: result.name,
            download_url: result.download,
            archive_filename,
            declared_size: result.size,
        }
    }
}

/// One decoded API response for a given year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearListing {
    /// Requested year.
    pub year: i32,
    /// Paging metadata.
    pub page: PageInfo,
    /// Packs, in the order the API returned them.
    pub entries: Vec<PackEntry>,
}

impl YearListing {
    /// Decodes a raw listing payload.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the payload does not match the
    /// listing shape.
    pub fn from_json(year: i32, body: &[u8]) -> Result<Self, serde_json::Error> {
        let response: ListingResponse = serde_json::from_slice(body)?;
        Ok(Self {
            year,
            page: response.page.unwrap_or_default(),
            entries: response
                .results
                .unwrap_or_default()
                .into_iter()
                .map(PackEntry::from_result)
                .collect(),
        })
    }

    /// Number of packs in the listing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true for years without any packs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Picks the on-disk archive filename for a pack.
fn resolve_archive_filename(archive: Option<&str>, download_url: &str, pack_name: &str) -> String {
    archive
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.rsplit('/').next().unwrap_or(name).to_string())
        .or_else(|| filename_from_url(download_url))
        .map_or_else(
            || format!("{}.zip", sanitize_filename(pack_name)),
            |name| sanitize_filename(&name),
        )
}

// ==================== ListingClient ====================

/// Retrieves year listings from the pack index API.
#[derive(Debug, Clone)]
pub struct ListingClient {
    client: Client,
    base_url: String,
}

impl ListingClient {
    /// Creates a client against the public API, sharing `http`'s connection pool.
    #[must_use]
    pub fn new(http: &HttpClient) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(http: &HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: http.inner().clone(),
            base_url,
        }
    }

    /// Endpoint URL for `year`.
    #[must_use]
    pub fn year_url(&self, year: i32) -> String {
        format!("{}/year/{year}", self.base_url)
    }

    /// Fetches and decodes the listing for `year`.
    ///
    /// Years without data are expected to come back as an empty result set.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Network`] or [`ListingError::HttpStatus`] on
    /// transport failures and [`ListingError::Decode`] on malformed payloads.
    #[instrument(skip(self))]
    pub async fn fetch_year_listing(&self, year: i32) -> Result<YearListing, ListingError> {
        let url = self.year_url(year);
        debug!(url = %url, "fetching year listing");

        let network = |source: reqwest::Error| ListingError::Network {
            year,
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(&network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::HttpStatus {
                year,
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(&network)?;
        let listing = YearListing::from_json(year, &body).map_err(|source| ListingError::Decode {
            year,
            url: url.clone(),
            source,
        })?;

        debug!(
            packs = listing.len(),
            advertised = listing.page.total,
            page = listing.page.page,
            pages = listing.page.pages,
            "decoded year listing"
        );
        Ok(listing)
    }
}
