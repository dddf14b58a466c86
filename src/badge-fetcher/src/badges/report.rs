//! Folder fetch reports.

use super::badge::Badge;
use crate::summary::{FetchOutcome, FetchSummary};
use serde::Serialize;

/// How a folder fetch reacts to a badge file that cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort on the first failure.
    #[default]
    FailFast,
    /// Record the failure and continue with the next file.
    KeepGoing,
}

/// Badges collected from a folder, with one outcome per candidate file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BadgeReport {
    /// Successfully parsed badges, in tree order.
    pub badges: Vec<Badge>,

    /// Outcome of every candidate file.
    pub outcomes: Vec<FetchOutcome>,

    /// Counters over `outcomes`.
    pub summary: FetchSummary,
}

impl BadgeReport {
    /// Records an outcome and updates the summary.
    pub fn record(&mut self, outcome: FetchOutcome) {
        self.summary.record(&outcome);
        self.outcomes.push(outcome);
    }
}
