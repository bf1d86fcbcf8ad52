//! HTTP gateway: the two startup endpoints plus a liveness route.
//!
//! Each POST handler is one linear pipeline: parse and validate the body,
//! render the prompt, make a single provider call, map the outcome. Any
//! failure short-circuits to an [`ApiError`] response.

pub mod error;

pub use error::{ApiError, ErrorBody};

use crate::config::{Config, GatewayConfig};
use crate::observability::{self, Observer, ObserverEvent};
use crate::providers::{self, Provider, SamplingOptions};
use crate::startup::{
    render_faq, render_validation, FaqRequest, ValidationRequest, FAQ_SAMPLING,
    VALIDATION_SAMPLING,
};
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

pub const LIVENESS_MESSAGE: &str = "AI Startup Validator & FAQ Builder Backend is running!";

const VALIDATE_ENDPOINT: &str = "validate_startup";
const FAQ_ENDPOINT: &str = "generate_faq";

/// Shared, read-only handler state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn Provider>,
    model: Arc<str>,
    observer: Arc<dyn Observer>,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub success: bool,
    pub ai_response: String,
}

#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub success: bool,
    pub faq_content: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn Provider>, model: &str, observer: Arc<dyn Observer>) -> Self {
        Self {
            provider,
            model: Arc::from(model),
            observer,
        }
    }

    /// Build provider and observer from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider: Arc<dyn Provider> = Arc::from(
            providers::create_provider(&config.provider).context("Failed to create provider")?,
        );
        let observer: Arc<dyn Observer> =
            Arc::from(observability::create_observer(&config.observability));
        Ok(Self::new(provider, &config.provider.model, observer))
    }

    fn reject(&self, endpoint: &'static str, err: ApiError) -> ApiError {
        let event = match &err {
            ApiError::Validation(reason) => ObserverEvent::RequestRejected {
                endpoint,
                reason: (*reason).to_string(),
            },
            other => ObserverEvent::Error {
                component: format!("gateway.{endpoint}"),
                message: other.diagnostic(),
            },
        };
        self.observer.record_event(&event);
        err
    }

    /// One provider call. It runs on its own task, so a client disconnect
    /// does not cancel it.
    async fn complete(
        &self,
        endpoint: &'static str,
        prompt: String,
        options: SamplingOptions,
    ) -> Result<String, ApiError> {
        self.observer.record_event(&ObserverEvent::LlmRequest {
            endpoint,
            provider: self.provider.name().to_string(),
            model: self.model.to_string(),
            prompt_chars: prompt.chars().count(),
        });

        let provider = Arc::clone(&self.provider);
        let model = Arc::clone(&self.model);
        let started = Instant::now();
        let joined =
            tokio::spawn(async move { provider.chat(&prompt, &model, options).await }).await;

        let result = match joined {
            Ok(outcome) => outcome.map_err(ApiError::from),
            Err(e) => Err(ApiError::Internal(format!("provider task failed: {e}"))),
        };

        self.observer.record_event(&ObserverEvent::LlmResponse {
            endpoint,
            provider: self.provider.name().to_string(),
            model: self.model.to_string(),
            duration: started.elapsed(),
            success: result.is_ok(),
            error_message: result.as_ref().err().map(ApiError::diagnostic),
        });

        result
    }
}

async fn handle_root() -> &'static str {
    LIVENESS_MESSAGE
}

async fn handle_validate_startup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValidationResponse>, ApiError> {
    let request = ValidationRequest::from_json(&body)
        .map_err(|e| state.reject(VALIDATE_ENDPOINT, e.into()))?;
    let prompt = render_validation(&request);
    let ai_response = state
        .complete(VALIDATE_ENDPOINT, prompt, VALIDATION_SAMPLING)
        .await?;
    Ok(Json(ValidationResponse {
        success: true,
        ai_response,
    }))
}

async fn handle_generate_faq(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FaqResponse>, ApiError> {
    let request =
        FaqRequest::from_json(&body).map_err(|e| state.reject(FAQ_ENDPOINT, e.into()))?;
    let prompt = render_faq(&request);
    let faq_content = state.complete(FAQ_ENDPOINT, prompt, FAQ_SAMPLING).await?;
    Ok(Json(FaqResponse {
        success: true,
        faq_content,
    }))
}

pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/validate_startup", post(handle_validate_startup))
        .route("/generate_faq", post(handle_generate_faq))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs.max(1)),
        ))
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn run_gateway(host: &str, port: u16, config: Config) -> Result<()> {
    if config.provider.api_key.is_none() {
        tracing::warn!(
            "Provider API key not configured; POST endpoints will answer 500 until it is set"
        );
    }

    let state = AppState::from_config(&config)?;
    let app = build_router(state, &config.gateway);

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind gateway on {host}:{port}"))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, model = %config.provider.model, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
