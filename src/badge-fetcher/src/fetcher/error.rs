//! Fetcher error types.

/// Errors that can occur while setting up or running a fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Badge discovery and retrieval errors.
    #[error(transparent)]
    Badge(#[from] crate::badges::BadgeError),
}
