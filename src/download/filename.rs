//! Filename derivation and sanitization for downloaded archives.
//!
//! Pack names and archive names come from a remote listing, so anything that
//! becomes a path segment goes through [`sanitize_filename`] first.

use tracing::debug;
use url::Url;

/// Returns the percent-decoded last path segment of `url`, if any.
#[must_use]
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(last).map_or_else(
        |e| {
            debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
            last.to_string()
        },
        std::borrow::Cow::into_owned,
    );
    Some(decoded)
}

/// Sanitizes a single path segment for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |` and control characters) and neutralizes the
/// `.`/`..` segments so the result can never step out of its parent.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if sanitized.chars().all(|c| c == '.') {
        return sanitized.replace('.', "_");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url_takes_last_segment() {
        assert_eq!(
            filename_from_url("https://16colo.rs/archive/1996/acid-50a.zip"),
            Some("acid-50a.zip".to_string())
        );
    }

    #[test]
    fn test_filename_from_url_decodes_percent_escapes() {
        assert_eq!(
            filename_from_url("https://16colo.rs/archive/1996/blocktronics%20x.lha"),
            Some("blocktronics x.lha".to_string())
        );
    }

    #[test]
    fn test_filename_from_url_trailing_slash_is_none() {
        assert_eq!(filename_from_url("https://16colo.rs/archive/1996/"), None);
        assert_eq!(filename_from_url("not a url"), None);
    }

    #[test]
    fn test_sanitize_filename_replaces_separators() {
        assert_eq!(sanitize_filename("ice/9607"), "ice_9607");
        assert_eq!(sanitize_filename("a\\b:c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_filename_neutralizes_dot_segments() {
        assert_eq!(sanitize_filename(".."), "__");
        assert_eq!(sanitize_filename("."), "_");
        assert_eq!(sanitize_filename(""), "_");
        assert_eq!(sanitize_filename("../etc"), ".._etc");
    }

    #[test]
    fn test_sanitize_filename_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("mimic-85"), "mimic-85");
        assert_eq!(sanitize_filename("ACID-50A.ZIP"), "ACID-50A.ZIP");
    }
}
