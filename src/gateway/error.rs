//! Handler-boundary errors and their JSON bodies.

use crate::config::schema::API_KEY_ENV;
use crate::providers::ProviderError;
use crate::startup::RequestError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Everything a handler can fail with. Each variant maps to one status and
/// one body shape.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required field missing; carries the endpoint's fixed message.
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Internal(String),
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::MissingFields(message) => Self::Validation(message),
            RequestError::MalformedBody(detail) => Self::Internal(detail),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            raw_response: None,
        }
    }

    fn unexpected(detail: &str) -> Self {
        Self {
            error: format!("An unexpected error occurred: {detail}"),
            details: Some(detail.to_string()),
            raw_response: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Provider(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short taxonomy label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Provider(ProviderError::MissingCredential) => "configuration",
            Self::Provider(ProviderError::Request(_)) => "provider_request",
            Self::Provider(ProviderError::InvalidJson { .. }) => "provider_response",
            Self::Provider(ProviderError::EmptyResult { .. }) => "provider_empty_result",
            Self::Provider(ProviderError::Internal(_)) | Self::Internal(_) => "internal",
        }
    }

    /// Log line for this failure, raw provider bodies included.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Provider(ProviderError::InvalidJson { raw }) => {
                format!("{}: invalid JSON from provider. Raw response: {raw}", self.kind())
            }
            Self::Provider(ProviderError::EmptyResult { raw }) => {
                format!("{}: no choices from provider. Raw response: {raw}", self.kind())
            }
            other => format!("{}: {other}", other.kind()),
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(message) => ErrorBody::message(*message),
            Self::Provider(ProviderError::MissingCredential) => {
                ErrorBody::message(format!("{API_KEY_ENV} is not set."))
            }
            Self::Provider(ProviderError::Request(detail)) => ErrorBody {
                error: format!("NVIDIA API request failed: {detail}"),
                details: Some(detail.clone()),
                raw_response: None,
            },
            Self::Provider(ProviderError::InvalidJson { raw }) => ErrorBody {
                error: "Invalid JSON response from NVIDIA API.".into(),
                details: None,
                raw_response: Some(serde_json::Value::String(raw.clone())),
            },
            Self::Provider(ProviderError::EmptyResult { raw }) => ErrorBody {
                error: "No valid response from NVIDIA API.".into(),
                details: None,
                raw_response: Some(raw.clone()),
            },
            Self::Provider(ProviderError::Internal(detail)) | Self::Internal(detail) => {
                ErrorBody::unexpected(detail)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
