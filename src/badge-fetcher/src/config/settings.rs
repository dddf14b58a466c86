//! Settings file deserialization.

use serde::Deserialize;

/// Parsed contents of a settings file.
///
/// ```toml
/// token = "ghp_..."
/// api-base = "https://ghe.example.com/api/v3"
/// keep-going = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// GitHub personal access token.
    #[serde(default)]
    pub token: Option<String>,

    /// REST API base URL; derived from the badge URL host when absent.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Continue past badge files that fail to fetch or parse.
    #[serde(default)]
    pub keep_going: bool,
}
