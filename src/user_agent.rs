//! Shared User-Agent string for listing and download requests.

/// Project URL for User-Agent identification.
pub const PROJECT_URL: &str = "https://github.com/robbiew/fetch16c";

/// Default User-Agent for every request the tool makes.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("fetch16c/{version} (+{PROJECT_URL})")
}
