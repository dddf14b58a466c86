//! Content decoding error types.

use thiserror::Error;

/// Errors that can occur while decoding file content returned by GitHub.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The response carried no content field.
    #[error("Response has no content")]
    MissingContent,

    /// The content uses an encoding other than base64 or utf-8.
    #[error("Unsupported content encoding '{0}'")]
    UnsupportedEncoding(String),

    /// Base64 decoding failed.
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8.
    #[error("Content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
