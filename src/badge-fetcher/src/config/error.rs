//! Settings error types.

use thiserror::Error;

/// Errors that can occur while loading or applying settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("Settings file not found: {path}")]
    NotFound { path: String },

    /// The settings file exists but could not be read.
    #[error("Can not read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("Malformed settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value. `origin` is the file path, or the
    /// flag / variable the value came from.
    #[error("Invalid setting from '{origin}': {message}")]
    Invalid { origin: String, message: String },
}
