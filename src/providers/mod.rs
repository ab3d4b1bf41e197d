//! HTTP clients for the external signal providers.

pub mod serpapi;
pub mod youtube;

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;

pub use serpapi::SerpApiClient;
pub use youtube::YouTubeClient;

pub(crate) fn build_http_client(
    provider: &'static str,
    timeout_ms: u64,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms.max(1)))
        .build()
        .map_err(|source| ProviderError::Http { provider, source })
}

/// Checks the status and decodes a JSON body, keeping the provider's error
/// body as detail on failure.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            provider,
            status,
            detail: error_body.trim().to_string(),
        });
    }

    response.json().await.map_err(|err| ProviderError::Payload {
        provider,
        message: err.to_string(),
    })
}

pub(crate) fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
