use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to an external data provider.
///
/// The analysis collector downgrades every variant to a warning; the scoring
/// core never sees these.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{provider} error: {status} {detail}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        detail: String,
    },

    /// The provider reported an error inside a 200 response body.
    #[error("{provider} error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    /// The body did not have the expected shape.
    #[error("{provider} response parse failed: {message}")]
    Payload {
        provider: &'static str,
        message: String,
    },

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
