pub mod nvidia;
pub mod traits;

pub use nvidia::NvidiaProvider;
pub use traits::{Provider, ProviderResult, SamplingOptions};

use crate::config::ProviderConfig;
use crate::util::truncate_with_ellipsis;
use anyhow::bail;
use std::time::Duration;

/// Max chars of an error body carried into `ProviderError::Request`.
const MAX_API_ERROR_CHARS: usize = 200;

/// Every way a provider call can fail. Callers match each variant explicitly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("provider API key is not configured")]
    MissingCredential,

    /// Transport failure, timeout or non-2xx status.
    #[error("{0}")]
    Request(String),

    /// Body was not JSON. Holds the raw text.
    #[error("invalid JSON response from provider")]
    InvalidJson { raw: String },

    /// JSON without a usable `choices` list. Holds the parsed body.
    #[error("no choices in provider response")]
    EmptyResult { raw: serde_json::Value },

    #[error("{0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Build a `ProviderError::Request` from a non-2xx response, keeping a short
/// preview of the body.
pub(crate) async fn api_error(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        ProviderError::Request(format!("{provider} API error {status} for url: {url}"))
    } else {
        ProviderError::Request(format!(
            "{provider} API error {status} for url: {url}: {}",
            truncate_with_ellipsis(body, MAX_API_ERROR_CHARS)
        ))
    }
}

/// Create a provider from config.
///
/// `nvidia` uses `api_url` from config; `custom:<url>` targets any
/// OpenAI-compatible chat-completions URL.
pub fn create_provider(config: &ProviderConfig) -> anyhow::Result<Box<dyn Provider>> {
    let timeout = Duration::from_secs(config.timeout_secs.max(1));
    let key = config.api_key.as_deref();

    match config.name.as_str() {
        "nvidia" | "" => Ok(Box::new(NvidiaProvider::new(
            "nvidia",
            key,
            &config.api_url,
            timeout,
        ))),
        name if name.starts_with("custom:") => {
            let url = name.strip_prefix("custom:").unwrap_or("").trim();
            if url.is_empty() {
                bail!("provider.name = \"custom:\" requires a URL, e.g. custom:http://localhost:8000/v1/chat/completions");
            }
            Ok(Box::new(NvidiaProvider::new("custom", key, url, timeout)))
        }
        other => bail!("Unknown provider: \"{other}\". Valid: nvidia, custom:<url>"),
    }
}
