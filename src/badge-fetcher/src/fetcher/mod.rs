//! Configured entry point for badge retrieval.

mod config;
mod error;

pub use config::FetcherConfig;
pub use error::FetcherError;

use crate::badges::{
    collect_badges, get_badge_by_blob, get_badge_by_url, get_badges, get_light_badges, Badge,
    BadgeReport, LightBadge,
};
use crate::github::build_client;
use octocrab::Octocrab;
use tracing::debug;

/// Fetches badges with a client built from a [`FetcherConfig`].
pub struct BadgeFetcher {
    config: FetcherConfig,
    octocrab: Octocrab,
}

impl BadgeFetcher {
    /// Builds a fetcher from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError::Octocrab`] if the client cannot be built.
    pub fn new(config: FetcherConfig) -> Result<Self, FetcherError> {
        debug!(
            authenticated = config.token().is_some(),
            api_base = ?config.api_base().map(url::Url::as_str),
            "Building GitHub client"
        );
        let octocrab = build_client(config.token(), config.api_base())?;
        Ok(Self { config, octocrab })
    }

    /// Returns the configuration this fetcher was built with.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Lists every file under a folder URL as a light badge.
    ///
    /// # Errors
    ///
    /// See [`get_light_badges`].
    pub async fn light_badges(&self, folder_url: &str) -> Result<Vec<LightBadge>, FetcherError> {
        Ok(get_light_badges(&self.octocrab, folder_url).await?)
    }

    /// Fetches every badge under a folder URL, failing on the first error.
    ///
    /// # Errors
    ///
    /// See [`get_badges`].
    pub async fn badges(&self, folder_url: &str) -> Result<Vec<Badge>, FetcherError> {
        Ok(get_badges(&self.octocrab, folder_url).await?)
    }

    /// Fetches every badge under a folder URL using the configured failure
    /// policy.
    ///
    /// # Errors
    ///
    /// See [`collect_badges`].
    pub async fn collect(&self, folder_url: &str) -> Result<BadgeReport, FetcherError> {
        Ok(collect_badges(&self.octocrab, folder_url, self.config.failure_policy()).await?)
    }

    /// Fetches a single badge from its file URL.
    ///
    /// # Errors
    ///
    /// See [`get_badge_by_url`].
    pub async fn badge(&self, badge_url: &str) -> Result<Badge, FetcherError> {
        Ok(get_badge_by_url(&self.octocrab, badge_url).await?)
    }

    /// Fetches a single badge by repository id and blob SHA.
    ///
    /// # Errors
    ///
    /// See [`get_badge_by_blob`].
    pub async fn blob_badge(&self, repository_id: u64, sha: &str) -> Result<Badge, FetcherError> {
        Ok(get_badge_by_blob(&self.octocrab, repository_id, sha).await?)
    }
}
