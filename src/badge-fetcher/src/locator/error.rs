//! URL locator error types.

use thiserror::Error;

/// Errors that can occur while parsing a repository web URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocatorError {
    /// The URL could not be parsed or is not an absolute http(s) URL.
    #[error("Invalid repository URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The URL path does not name an owner and repository.
    #[error("Repository URL must match /owner/repo[/tree|blob/<branch>/<path>]: {url}")]
    MissingPathSegments { url: String },

    /// The segment after the repository is neither `tree` nor `blob`.
    #[error("Unsupported view '{view}' in repository URL: {url}")]
    UnsupportedView { url: String, view: String },
}
