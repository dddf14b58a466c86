//! Badge retrieval error types.

use super::badge::BadgeParseError;
use crate::github::ContentError;
use crate::locator::LocatorError;
use thiserror::Error;

/// Errors that can occur while locating, fetching or parsing badges.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The URL could not be parsed.
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The organization has no repository with the given name.
    #[error("Repository '{repository}' not found in '{owner}'")]
    RepositoryNotFound { owner: String, repository: String },

    /// No branch of the repository matches the URL.
    #[error("Unable to locate branch name: {url}")]
    BranchNotFound { url: String },

    /// The path does not exist on the branch.
    #[error("Path '{path}' not found on branch '{branch}'")]
    PathNotFound { path: String, branch: String },

    /// The path is neither a folder nor a file.
    #[error("Path '{path}' is a {kind}, expected a folder or file")]
    UnsupportedEntry { path: String, kind: String },

    /// The URL does not name a `-badge.json` file.
    #[error("Badge file not found in: {url}")]
    NotABadgeFile { url: String },

    /// The URL names a folder where a file was expected.
    #[error("Expected a file but found a folder: {url}")]
    NotAFile { url: String },

    /// File content could not be decoded.
    #[error("Failed to decode content of '{location}': {source}")]
    Content {
        location: String,
        #[source]
        source: ContentError,
    },

    /// File content is not a valid badge.
    #[error("Can not parse badge at '{location}': {source}")]
    Parse {
        location: String,
        #[source]
        source: BadgeParseError,
    },
}
