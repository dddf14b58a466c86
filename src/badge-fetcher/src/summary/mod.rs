//! Fetch summary types and helpers.

mod fetch_summary;
mod outcome;

pub use fetch_summary::FetchSummary;
pub use outcome::FetchOutcome;
