//! Fetcher configuration.

use crate::badges::FailurePolicy;
use crate::config::{validate_api_base, validate_token, ConfigError, Settings};
use url::Url;

/// Configuration for a [`BadgeFetcher`](super::BadgeFetcher).
#[derive(Debug, Clone, Default)]
pub struct FetcherConfig {
    /// GitHub token; requests are anonymous without one.
    token: Option<String>,
    /// REST API base URL; octocrab's default (api.github.com) when absent.
    api_base: Option<Url>,
    /// Reaction to badge files that fail to fetch or parse.
    failure_policy: FailurePolicy,
}

impl FetcherConfig {
    /// Creates an anonymous configuration against api.github.com.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from a loaded settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the token is blank or the API
    /// base is invalid.
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let invalid = |message| ConfigError::Invalid {
            origin: "settings".to_string(),
            message,
        };

        if let Some(token) = &settings.token {
            validate_token(token).map_err(invalid)?;
        }

        let api_base = settings
            .api_base
            .as_deref()
            .map(validate_api_base)
            .transpose()
            .map_err(invalid)?;

        Ok(Self {
            token: settings.token,
            api_base,
            failure_policy: if settings.keep_going {
                FailurePolicy::KeepGoing
            } else {
                FailurePolicy::FailFast
            },
        })
    }

    /// Sets the GitHub token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the REST API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Sets the failure policy used by folder fetches.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the configured API base URL.
    pub fn api_base(&self) -> Option<&Url> {
        self.api_base.as_ref()
    }

    /// Returns the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = FetcherConfig::new()
            .with_token("secret")
            .with_api_base(Url::parse("http://localhost:9000/api/v3").unwrap())
            .with_failure_policy(FailurePolicy::KeepGoing);

        assert_eq!(config.token(), Some("secret"));
        assert_eq!(
            config.api_base().map(Url::as_str),
            Some("http://localhost:9000/api/v3")
        );
        assert_eq!(config.failure_policy(), FailurePolicy::KeepGoing);
    }

    #[test]
    fn defaults_are_anonymous_and_fail_fast() {
        let config = FetcherConfig::new();

        assert!(config.token().is_none());
        assert!(config.api_base().is_none());
        assert_eq!(config.failure_policy(), FailurePolicy::FailFast);
    }

    #[test]
    fn from_settings_maps_keep_going() {
        let settings = Settings {
            token: Some("secret".to_string()),
            api_base: Some("https://ghe.example.com/api/v3".to_string()),
            keep_going: true,
        };

        let config = FetcherConfig::from_settings(settings).unwrap();

        assert_eq!(config.token(), Some("secret"));
        assert_eq!(config.failure_policy(), FailurePolicy::KeepGoing);
    }

    #[test]
    fn from_settings_rejects_bad_api_base() {
        let settings = Settings {
            api_base: Some("nope".to_string()),
            ..Settings::default()
        };

        let result = FetcherConfig::from_settings(settings);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn from_settings_rejects_blank_token() {
        let settings = Settings {
            token: Some(String::new()),
            ..Settings::default()
        };

        let result = FetcherConfig::from_settings(settings);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
