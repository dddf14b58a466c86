use std::path::PathBuf;

use badge_fetcher::{load_settings, ConfigError, FailurePolicy, FetcherConfig};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/settings")
}

#[test]
fn load_settings_from_fixture() {
    let settings = load_settings(&fixtures_root().join("enterprise.toml")).unwrap();

    assert_eq!(settings.token.as_deref(), Some("ghp_fixture"));
    assert_eq!(
        settings.api_base.as_deref(),
        Some("https://ghe.example.com/api/v3")
    );
    assert!(settings.keep_going);

    let config = FetcherConfig::from_settings(settings).unwrap();
    assert_eq!(
        config.api_base().map(|url| url.as_str()),
        Some("https://ghe.example.com/api/v3")
    );
    assert_eq!(config.failure_policy(), FailurePolicy::KeepGoing);
}

#[test]
fn load_settings_rejects_invalid_fixture() {
    let result = load_settings(&fixtures_root().join("broken-api-base.toml"));

    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}
