use super::traits::{Provider, ProviderResult, SamplingOptions};
use super::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat-completions client. Defaults to NVIDIA's hosted
/// endpoint; any compatible URL works.
pub struct NvidiaProvider {
    name: String,
    api_key: Option<String>,
    api_url: String,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl NvidiaProvider {
    pub fn new(name: &str, api_key: Option<&str>, api_url: &str, timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string),
            api_url: api_url.trim().to_string(),
            timeout,
            // One budget covers connect, send and read.
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn resolve_auth(&self) -> ProviderResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)
    }
}

/// Pull the first choice's text out of a decoded body.
fn first_choice_text(body: serde_json::Value) -> ProviderResult<String> {
    let first = match body
        .get("choices")
        .and_then(serde_json::Value::as_array)
        .and_then(|choices| choices.first())
    {
        Some(first) => first.clone(),
        None => return Err(ProviderError::EmptyResult { raw: body }),
    };

    serde_json::from_value::<Choice>(first)
        .map(|choice| choice.message.content)
        .map_err(|e| ProviderError::Internal(format!("malformed choice in provider response: {e}")))
}

#[async_trait]
impl Provider for NvidiaProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(
        &self,
        message: &str,
        model: &str,
        options: SamplingOptions,
    ) -> ProviderResult<String> {
        let token = self.resolve_auth()?;
        tracing::debug!(
            provider = %self.name,
            timeout_secs = self.timeout.as_secs(),
            "Sending chat completion"
        );

        let request = ChatRequest {
            model,
            messages: vec![Message {
                role: "user",
                content: message,
            }],
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens: options.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(super::api_error(&self.name, response).await);
        }

        let text = response.text().await?;
        let body: serde_json::Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) => return Err(ProviderError::InvalidJson { raw: text }),
        };

        first_choice_text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";

    fn provider(key: Option<&str>) -> NvidiaProvider {
        NvidiaProvider::new("nvidia", key, URL, Duration::from_secs(60))
    }

    #[test]
    fn creates_with_key() {
        let p = provider(Some("nvapi-test123"));
        assert_eq!(p.api_key.as_deref(), Some("nvapi-test123"));
        assert_eq!(p.name(), "nvidia");
    }

    #[test]
    fn creates_without_key() {
        assert!(provider(None).api_key.is_none());
    }

    #[test]
    fn blank_key_is_missing() {
        assert!(provider(Some("  ")).api_key.is_none());
    }

    #[test]
    fn single_timeout_budget_from_config() {
        assert_eq!(provider(None).timeout, Duration::from_secs(60));
        let p = NvidiaProvider::new("nvidia", None, URL, Duration::from_millis(1500));
        assert_eq!(p.timeout, Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn chat_fails_without_key() {
        let result = provider(None)
            .chat("hello", "meta/llama3-8b-instruct", SamplingOptions::new(1000))
            .await;
        assert!(matches!(result, Err(ProviderError::MissingCredential)));
    }

    #[tokio::test]
    async fn missing_key_checked_before_network() {
        // Unroutable URL: reaching the network would yield Request, not MissingCredential
        let p = NvidiaProvider::new("nvidia", None, "http://0.0.0.0:1/x", Duration::from_secs(1));
        let result = p.chat("hi", "m", SamplingOptions::new(1)).await;
        assert!(matches!(result, Err(ProviderError::MissingCredential)));
    }

    #[test]
    fn chat_request_serializes_wire_fields() {
        let opts = SamplingOptions::new(1024);
        let req = ChatRequest {
            model: "meta/llama3-8b-instruct",
            messages: vec![Message {
                role: "user",
                content: "evaluate {this}",
            }],
            temperature: opts.temperature,
            top_p: opts.top_p,
            max_tokens: opts.max_tokens,
            stream: false,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "meta/llama3-8b-instruct",
                "messages": [{"role": "user", "content": "evaluate {this}"}],
                "temperature": 0.7,
                "top_p": 0.9,
                "max_tokens": 1024,
                "stream": false
            })
        );
    }

    #[test]
    fn first_choice_used() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "First"}},
                {"message": {"role": "assistant", "content": "Second"}}
            ]
        });
        assert_eq!(first_choice_text(body).unwrap(), "First");
    }

    #[test]
    fn empty_choices_is_empty_result() {
        let body = json!({"choices": []});
        match first_choice_text(body.clone()) {
            Err(ProviderError::EmptyResult { raw }) => assert_eq!(raw, body),
            other => panic!("expected EmptyResult, got {other:?}"),
        }
    }

    #[test]
    fn missing_choices_is_empty_result() {
        let body = json!({"id": "cmpl-1", "object": "chat.completion"});
        assert!(matches!(
            first_choice_text(body),
            Err(ProviderError::EmptyResult { .. })
        ));
    }

    #[test]
    fn null_body_is_empty_result() {
        assert!(matches!(
            first_choice_text(serde_json::Value::Null),
            Err(ProviderError::EmptyResult { .. })
        ));
    }

    #[test]
    fn choice_without_content_is_internal() {
        let body = json!({"choices": [{"finish_reason": "length"}]});
        match first_choice_text(body) {
            Err(ProviderError::Internal(msg)) => assert!(msg.contains("malformed choice")),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn null_content_is_internal() {
        let body = json!({"choices": [{"message": {"content": null}}]});
        assert!(matches!(
            first_choice_text(body),
            Err(ProviderError::Internal(_))
        ));
    }
}
