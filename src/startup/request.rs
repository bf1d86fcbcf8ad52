//! Inbound request records and their field-presence rules.

use serde_json::{Map, Value};

pub const VALIDATION_MISSING_FIELDS: &str = "Missing one or more required startup details.";
pub const FAQ_MISSING_FIELDS: &str = "Missing startup name or description.";

/// Why an inbound body could not become a request record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A required field is absent, empty, or not a string. The message is
    /// fixed per endpoint and never names the field.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Body is not a JSON object.
    #[error("{0}")]
    MalformedBody(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub startup_name: String,
    pub description: String,
    pub target_market: String,
    pub business_model: String,
    pub competitive_advantage: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqRequest {
    pub startup_name: String,
    pub startup_description: String,
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, RequestError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| RequestError::MalformedBody(format!("invalid JSON body: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(RequestError::MalformedBody(format!(
            "expected a JSON object body, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A field is present only as a non-empty JSON string. No trimming.
fn required(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

impl ValidationRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let map = parse_object(body)?;
        let missing = || RequestError::MissingFields(VALIDATION_MISSING_FIELDS);
        Ok(Self {
            startup_name: required(&map, "startupName").ok_or_else(missing)?,
            description: required(&map, "description").ok_or_else(missing)?,
            target_market: required(&map, "targetMarket").ok_or_else(missing)?,
            business_model: required(&map, "businessModel").ok_or_else(missing)?,
            competitive_advantage: required(&map, "competitiveAdvantage").ok_or_else(missing)?,
        })
    }
}

impl FaqRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, RequestError> {
        let map = parse_object(body)?;
        let missing = || RequestError::MissingFields(FAQ_MISSING_FIELDS);
        Ok(Self {
            startup_name: required(&map, "startupName").ok_or_else(missing)?,
            startup_description: required(&map, "startupDescription").ok_or_else(missing)?,
        })
    }
}
