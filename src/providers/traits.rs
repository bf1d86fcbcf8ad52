//! Provider trait: implement for any chat-completion backend.
//!
//! The gateway only ever talks to a `dyn Provider`, so tests can swap in a
//! scripted stub and deployments can point at any OpenAI-compatible endpoint.

use super::ProviderError;
use async_trait::async_trait;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Fixed sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl SamplingOptions {
    pub const fn new(max_tokens: u32) -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens,
        }
    }
}

/// Core provider trait. Implement for any LLM backend.
///
/// Implementations make exactly one network attempt per call and report every
/// failure as one of the [`ProviderError`] variants; they never retry.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use startup_validator::providers::{Provider, ProviderResult, SamplingOptions};
///
/// pub struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     async fn chat(
///         &self,
///         message: &str,
///         _model: &str,
///         _options: SamplingOptions,
///     ) -> ProviderResult<String> {
///         Ok(message.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name used in logs (e.g. "nvidia").
    fn name(&self) -> &str;

    /// Send a single user message and return the first choice's text.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingCredential`] before any network call when no
    ///   key is configured
    /// - [`ProviderError::Request`] on transport failure, timeout or non-2xx
    /// - [`ProviderError::InvalidJson`] when the body is not JSON
    /// - [`ProviderError::EmptyResult`] when `choices` is absent or empty
    /// - [`ProviderError::Internal`] for anything else
    async fn chat(
        &self,
        message: &str,
        model: &str,
        options: SamplingOptions,
    ) -> ProviderResult<String>;
}
