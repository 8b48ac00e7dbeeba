//! Per-year and per-run results.

use super::error::ErrorKind;

/// A pack that could not be fetched or extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackFailure {
    /// Pack name as listed by the API.
    pub name: String,
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable cause.
    pub reason: String,
}

/// How far processing of a year got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearOutcome {
    /// The listing was fetched and every pack was attempted.
    Processed,
    /// The year was skipped before any pack was attempted.
    Skipped {
        /// Failure category.
        kind: ErrorKind,
        /// Human-readable cause.
        reason: String,
    },
}

/// Result of processing one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReport {
    /// The year.
    pub year: i32,
    /// Whether the year's packs were attempted.
    pub outcome: YearOutcome,
    /// Packs in the listing.
    pub packs_total: usize,
    /// Names of packs extracted successfully, in listing order.
    pub extracted: Vec<String>,
    /// Packs that failed, in listing order.
    pub failures: Vec<PackFailure>,
}

impl YearReport {
    pub(crate) fn processed(year: i32, packs_total: usize) -> Self {
        Self {
            year,
            outcome: YearOutcome::Processed,
            packs_total,
            extracted: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn skipped(year: i32, kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            year,
            outcome: YearOutcome::Skipped {
                kind,
                reason: reason.into(),
            },
            packs_total: 0,
            extracted: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Names of the failed packs.
    pub fn failed_names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.name.as_str())
    }

    /// Returns true when the year was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, YearOutcome::Skipped { .. })
    }

    /// Returns true when the year was processed without a single failure.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.is_skipped() && self.failures.is_empty()
    }
}

/// Result of a whole run, one report per requested year in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Per-year reports.
    pub years: Vec<YearReport>,
}

impl Summary {
    /// Packs extracted across all years.
    #[must_use]
    pub fn extracted_count(&self) -> usize {
        self.years.iter().map(|year| year.extracted.len()).sum()
    }

    /// Packs failed across all years.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.years.iter().map(|year| year.failures.len()).sum()
    }

    /// Years that were skipped.
    #[must_use]
    pub fn skipped_years(&self) -> usize {
        self.years.iter().filter(|year| year.is_skipped()).count()
    }

    /// Returns true when any year was skipped or any pack failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0 || self.skipped_years() > 0
    }
}
