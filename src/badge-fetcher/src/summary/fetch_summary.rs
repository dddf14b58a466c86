//! Fetch summary counters.

use super::outcome::FetchOutcome;
use serde::Serialize;

/// Summary of a folder fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    /// Number of files found under the folder.
    pub candidates: usize,

    /// Number of badges fetched and parsed.
    pub fetched: usize,

    /// Number of files skipped (not badge files).
    pub skipped: usize,

    /// Number of badge files that failed to fetch or parse.
    pub failed: usize,
}

impl FetchSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with an outcome.
    pub fn record(&mut self, outcome: &FetchOutcome) {
        self.candidates += 1;
        match outcome {
            FetchOutcome::Fetched { .. } => self.fetched += 1,
            FetchOutcome::Skipped { .. } => self.skipped += 1,
            FetchOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Returns true if any badge failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if every badge file was fetched.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed == 0
    }
}
