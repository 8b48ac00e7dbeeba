//! Exit code logic for the fetch16c process.
//!
//! Single responsibility: map a run summary to the process exit outcome.

use fetch16c_core::Summary;

use crate::ProcessExit;

/// Determines the process exit outcome from a finished run.
pub(crate) fn determine_exit_outcome(summary: &Summary) -> ProcessExit {
    if !summary.has_failures() {
        ProcessExit::Success
    } else if summary.extracted_count() > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::determine_exit_outcome;
    use crate::ProcessExit;
    use fetch16c_core::{ErrorKind, PackFailure, Summary, YearOutcome, YearReport};

    fn year(extracted: &[&str], failed: &[&str]) -> YearReport {
        YearReport {
            year: 1996,
            outcome: YearOutcome::Processed,
            packs_total: extracted.len() + failed.len(),
            extracted: extracted.iter().map(ToString::to_string).collect(),
            failures: failed
                .iter()
                .map(|name| PackFailure {
                    name: (*name).to_string(),
                    kind: ErrorKind::Network,
                    reason: "HTTP 500".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_exit_outcome_success_when_no_failures() {
        let summary = Summary {
            years: vec![year(&["a", "b"], &[])],
        };
        assert_eq!(determine_exit_outcome(&summary), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_success_when_nothing_listed() {
        let summary = Summary {
            years: vec![year(&[], &[])],
        };
        assert_eq!(determine_exit_outcome(&summary), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_partial_when_mixed() {
        let summary = Summary {
            years: vec![year(&["a"], &["b"])],
        };
        assert_eq!(determine_exit_outcome(&summary), ProcessExit::Partial);
    }

    #[test]
    fn test_exit_outcome_failure_when_all_failed() {
        let summary = Summary {
            years: vec![year(&[], &["a", "b"])],
        };
        assert_eq!(determine_exit_outcome(&summary), ProcessExit::Failure);
    }

    #[test]
    fn test_exit_outcome_partial_when_a_year_was_skipped() {
        let skipped = YearReport {
            year: 1995,
            outcome: YearOutcome::Skipped {
                kind: ErrorKind::Decode,
                reason: "bad json".to_string(),
            },
            packs_total: 0,
            extracted: Vec::new(),
            failures: Vec::new(),
        };
        let summary = Summary {
            years: vec![year(&["a"], &[]), skipped],
        };
        assert_eq!(determine_exit_outcome(&summary), ProcessExit::Partial);
    }
}
