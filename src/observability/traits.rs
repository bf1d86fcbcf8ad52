use std::time::Duration;

/// What happened while serving one startup request.
#[derive(Debug, Clone)]
pub enum ObserverEvent {
    /// Prompt rendered, provider call about to start. Carries the prompt
    /// size only; prompt text may contain anything the client sent.
    LlmRequest {
        endpoint: &'static str,
        provider: String,
        model: String,
        prompt_chars: usize,
    },
    /// Provider call finished, successfully or not.
    LlmResponse {
        endpoint: &'static str,
        provider: String,
        model: String,
        duration: Duration,
        success: bool,
        error_message: Option<String>,
    },
    /// Body failed field validation; the provider was not called.
    RequestRejected {
        endpoint: &'static str,
        reason: String,
    },
    /// Failure outside the provider call (e.g. undecodable request body).
    Error { component: String, message: String },
}

/// Sink for request diagnostics. Backends must not block the handler.
pub trait Observer: Send + Sync + 'static {
    fn record_event(&self, event: &ObserverEvent);

    /// Flush buffered output; most backends have none.
    fn flush(&self) {}

    fn name(&self) -> &str;
}
