//! Per-file fetch outcomes.

use serde::Serialize;

/// Result of handling a single candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The badge was fetched and parsed.
    Fetched {
        /// Repository-relative path.
        path: String,
        /// Code of the parsed badge.
        code: String,
    },

    /// The file was not a badge candidate.
    Skipped {
        /// Repository-relative path.
        path: String,
        /// Reason for skipping.
        reason: String,
    },

    /// Fetching or parsing failed.
    Failed {
        /// Repository-relative path.
        path: String,
        /// Error message.
        error: String,
    },
}

impl FetchOutcome {
    /// Path of the file this outcome is about.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Fetched { path, .. } | Self::Skipped { path, .. } | Self::Failed { path, .. } => {
                path
            }
        }
    }
}
