//! Run configuration, built once and handed to the [`Pipeline`](super::Pipeline).

use std::path::PathBuf;
use std::time::Duration;

use chrono::Datelike;

use crate::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use crate::extract::ExtractOptions;
use crate::listing::DEFAULT_BASE_URL;

/// What to do when a year's directory already exists under the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Record the conflict, leave the directory alone and continue with the next year.
    #[default]
    Skip,
    /// Stop the whole run.
    Abort,
}

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root output directory; years are created directly beneath it.
    pub root: PathBuf,
    /// Number of years to process, counting back from `current_year` inclusive.
    pub years_back: u16,
    /// Most recent year to process.
    pub current_year: i32,
    /// Policy for pre-existing year directories.
    pub conflict_policy: ConflictPolicy,
    /// Listing API base URL.
    pub api_base_url: String,
    /// HTTP connect timeout.
    pub connect_timeout: Duration,
    /// Overall per-request timeout.
    pub request_timeout: Duration,
    /// Extraction settings.
    pub extract: ExtractOptions,
}

impl RunConfig {
    /// Creates a configuration for the last `years_back` years up to the
    /// current local year.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, years_back: u16) -> Self {
        Self {
            root: root.into(),
            years_back,
            current_year: chrono::Local::now().year(),
            conflict_policy: ConflictPolicy::default(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
            extract: ExtractOptions::default(),
        }
    }

    /// Years this configuration covers, most recent first.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        years_to_process(self.current_year, self.years_back)
    }
}

/// Returns `years_back` years descending from `current_year` inclusive.
#[must_use]
pub fn years_to_process(current_year: i32, years_back: u16) -> Vec<i32> {
    (0..i32::from(years_back))
        .map(|offset| current_year - offset)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_to_process_descends_inclusive() {
        assert_eq!(years_to_process(2024, 3), vec![2024, 2023, 2022]);
        assert_eq!(years_to_process(1999, 1), vec![1999]);
        assert!(years_to_process(1999, 0).is_empty());
    }

    #[test]
    fn test_new_config_defaults() {
        let config = RunConfig::new("art", 2);
        assert_eq!(config.conflict_policy, ConflictPolicy::Skip);
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.years().len(), 2);
        assert_eq!(config.years()[0], chrono::Local::now().year());
        assert!(config.extract.lha_binary.is_none());
    }
}
