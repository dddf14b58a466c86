//! Settings file loading.
//!
//! Settings are optional; every value can also be given on the command line,
//! which takes precedence.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::Settings;

use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Loads and validates a settings file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, unreadable, not valid
/// TOML, or fails validation.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    info!(path = %path.display(), "Loading settings");

    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    validate_settings(&settings, path)?;

    debug!(
        has_token = settings.token.is_some(),
        api_base = ?settings.api_base,
        keep_going = settings.keep_going,
        "Loaded settings"
    );
    Ok(settings)
}

/// Validates settings values.
fn validate_settings(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    let invalid = |message| ConfigError::Invalid {
        origin: path.display().to_string(),
        message,
    };

    if let Some(token) = &settings.token {
        validate_token(token).map_err(invalid)?;
    }

    if let Some(api_base) = &settings.api_base {
        validate_api_base(api_base).map_err(invalid)?;
    }

    Ok(())
}

/// Rejects blank tokens, which GitHub would answer with 401.
///
/// # Errors
///
/// Returns a message describing why the value was rejected.
pub fn validate_token(token: &str) -> Result<(), String> {
    if token.trim().is_empty() {
        return Err("token must not be empty".to_string());
    }
    Ok(())
}

/// Parses an API base URL, accepting only absolute http(s) URLs.
///
/// # Errors
///
/// Returns a message describing why the value was rejected.
pub fn validate_api_base(api_base: &str) -> Result<Url, String> {
    let url = Url::parse(api_base)
        .map_err(|e| format!("api-base is not a valid URL: {api_base} ({e})"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("api-base must use http or https: {api_base}"));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("badge-fetcher.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_settings() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(
            &temp,
            r#"
token = "secret"
api-base = "https://ghe.example.com/api/v3"
keep-going = true
"#,
        );

        let settings = load_settings(&path).unwrap();

        assert_eq!(settings.token.as_deref(), Some("secret"));
        assert_eq!(
            settings.api_base.as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
        assert!(settings.keep_going);
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "");

        let settings = load_settings(&path).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();

        let result = load_settings(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "token = ");

        let result = load_settings(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "tokn = \"typo\"");

        let result = load_settings(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validation_blank_token() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "token = \"   \"");

        let result = load_settings(&path);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_invalid_api_base() {
        let temp = TempDir::new().unwrap();
        let path = write_settings(&temp, "api-base = \"not-a-url\"");

        let result = load_settings(&path);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("ghp_abc").is_ok());
        assert!(validate_token("").is_err());
        assert!(validate_token(" \t").is_err());
    }

    #[test]
    fn test_validation_non_http_api_base() {
        assert!(validate_api_base("ftp://ghe.example.com").is_err());
        assert!(validate_api_base("http://localhost:8080/api/v3").is_ok());
    }
}
