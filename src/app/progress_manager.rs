//! Console output for a run: the per-download progress bar and the per-pack
//! and per-year messages.

use std::sync::Mutex;

use fetch16c_core::{
    DownloadProgress, ExtractionOutcome, PackEntry, PackFailure, RunObserver, Summary,
    YearOutcome, YearReport,
};
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} {bytes} ({bytes_per_sec})";

/// Renders one `indicatif` bar per download on stderr.
///
/// Falls back to a spinner when the server does not announce a length.
#[derive(Debug, Default)]
pub(crate) struct TerminalProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|guard| guard.clone())
    }
}

impl DownloadProgress for TerminalProgress {
    fn on_start(&self, label: &str, total_bytes: Option<u64>) {
        let bar = match total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(label.to_string());
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_advance(&self, bytes_written: u64) {
        if let Some(bar) = self.current() {
            bar.set_position(bytes_written);
        }
    }

    fn on_finish(&self) {
        let finished = self.bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(bar) = finished {
            bar.finish_and_clear();
        }
    }
}

/// Prints pack results and per-year failure lists to stdout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsolePrinter {
    quiet: bool,
}

impl ConsolePrinter {
    pub(crate) fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl RunObserver for ConsolePrinter {
    fn year_started(&self, year: i32, packs: usize) {
        if !self.quiet {
            println!("Processing year {year} ({packs} packs)");
        }
    }

    fn pack_extracted(&self, _year: i32, entry: &PackEntry, outcome: &ExtractionOutcome) {
        if !self.quiet {
            println!("{}", extracted_line(&entry.name, outcome.file_count()));
        }
    }

    fn pack_failed(&self, _year: i32, failure: &PackFailure) {
        if !self.quiet {
            println!("Error processing {}: {}", failure.name, failure.reason);
        }
    }

    fn year_finished(&self, report: &YearReport) {
        for line in year_report_lines(report) {
            eprintln!("{line}");
        }
    }
}

pub(crate) fn extracted_line(pack: &str, files: usize) -> String {
    let noun = if files == 1 { "file" } else { "files" };
    format!("Extracted archive: {pack} ({files} {noun})")
}

/// Lines describing what went wrong in `report`; empty for a clean year.
pub(crate) fn year_report_lines(report: &YearReport) -> Vec<String> {
    match &report.outcome {
        YearOutcome::Skipped { kind, reason } => {
            vec![format!("Skipped year {} ({kind}): {reason}", report.year)]
        }
        YearOutcome::Processed if report.failures.is_empty() => Vec::new(),
        YearOutcome::Processed => {
            let mut lines = vec![format!(
                "Year {}: the following files had errors and were not processed:",
                report.year
            )];
            lines.extend(report.failures.iter().map(|failure| {
                format!("  - {} [{}] {}", failure.name, failure.kind, failure.reason)
            }));
            lines
        }
    }
}

/// One-line run summary printed at the end.
pub(crate) fn summary_line(summary: &Summary) -> String {
    format!(
        "Done: {} extracted, {} failed, {} of {} years skipped",
        summary.extracted_count(),
        summary.failed_count(),
        summary.skipped_years(),
        summary.years.len()
    )
}
