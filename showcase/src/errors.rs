use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type returned by the fallible outer layers (loading, configuration, argument parsing).
///
/// Normalization, feed merging and catalog filtering never produce one of these: malformed content
/// degrades to defaults instead.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Reading a content or configuration file failed.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A content file was not valid JSON.
    #[error("failed to parse JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be parsed or contained an unusable value.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Invalid input supplied to a feed/catalog/sitemap operation.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ShowcaseError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type ShowcaseResult<T> = Result<T, ShowcaseError>;
