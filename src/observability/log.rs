use super::traits::{Observer, ObserverEvent};
use crate::util::truncate_with_ellipsis;
use tracing::{error, info, warn};

/// Longest error text written to the log for a single event.
const MAX_LOGGED_CHARS: usize = 500;

/// Writes events as structured `tracing` records.
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        match event {
            ObserverEvent::LlmRequest {
                endpoint,
                provider,
                model,
                prompt_chars,
            } => {
                info!(endpoint, provider = %provider, model = %model, prompt_chars, "llm.request");
            }
            ObserverEvent::LlmResponse {
                endpoint,
                provider,
                model,
                duration,
                success,
                error_message,
            } => {
                let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
                if *success {
                    info!(endpoint, provider = %provider, model = %model, duration_ms = ms, "llm.response");
                } else {
                    let message = error_message
                        .as_deref()
                        .map(|m| truncate_with_ellipsis(m, MAX_LOGGED_CHARS))
                        .unwrap_or_default();
                    error!(
                        endpoint,
                        provider = %provider,
                        model = %model,
                        duration_ms = ms,
                        error = %message,
                        "llm.response failed"
                    );
                }
            }
            ObserverEvent::RequestRejected { endpoint, reason } => {
                warn!(endpoint, reason = %reason, "request.rejected");
            }
            ObserverEvent::Error { component, message } => {
                error!(
                    component = %component,
                    error = %truncate_with_ellipsis(message, MAX_LOGGED_CHARS),
                    "error"
                );
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn log_observer_name() {
        assert_eq!(LogObserver::new().name(), "log");
    }

    #[test]
    fn log_observer_all_events_no_panic() {
        let obs = LogObserver::new();
        obs.record_event(&ObserverEvent::LlmRequest {
            endpoint: "generate_faq",
            provider: "nvidia".into(),
            model: "meta/llama3-8b-instruct".into(),
            prompt_chars: 640,
        });
        obs.record_event(&ObserverEvent::LlmResponse {
            endpoint: "generate_faq",
            provider: "nvidia".into(),
            model: "meta/llama3-8b-instruct".into(),
            duration: Duration::from_millis(250),
            success: true,
            error_message: None,
        });
        obs.record_event(&ObserverEvent::LlmResponse {
            endpoint: "validate_startup",
            provider: "nvidia".into(),
            model: "meta/llama3-8b-instruct".into(),
            duration: Duration::from_secs(60),
            success: false,
            error_message: Some("x".repeat(10_000)),
        });
        obs.record_event(&ObserverEvent::RequestRejected {
            endpoint: "validate_startup",
            reason: "missing field".into(),
        });
        obs.record_event(&ObserverEvent::Error {
            component: "gateway".into(),
            message: "boom".into(),
        });
        obs.flush();
    }
}
