//! Configuration schema: TOML file, environment overrides, JSON Schema export.
//!
//! The resolved [`Config`] is built once at startup and handed to the gateway
//! and provider constructors. Nothing reads the environment after that.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "meta/llama3-8b-instruct";

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "NVIDIA_API_KEY";
pub const MODEL_ENV: &str = "STARTUP_VALIDATOR_MODEL";
pub const API_URL_ENV: &str = "STARTUP_VALIDATOR_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    #[schemars(skip)]
    pub config_path: PathBuf,

    pub provider: ProviderConfig,
    pub gateway: GatewayConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider selector: `nvidia` or `custom:<chat-completions-url>`.
    pub name: String,
    /// Bearer token. Absence is reported per request, never at startup.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "nvidia".into(),
            api_key: None,
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Whole-request deadline. Keep it above `provider.timeout_secs`.
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            max_body_bytes: 64 * 1024,
            request_timeout_secs: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `log` or `none`.
    pub backend: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: "log".into(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".startup-validator"),
        |dirs| dirs.home_dir().join(".startup-validator"),
    )
}

impl Config {
    /// Load from `path` (tilde-expanded) or the default location, then apply
    /// environment overrides. A missing file yields defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
            None => default_config_dir().join("config.toml"),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?
        } else {
            if path.is_some() {
                tracing::warn!(path = %config_path.display(), "Config file not found, using defaults");
            }
            Self::default()
        };

        config.config_path = config_path;
        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse TOML, warning about keys the schema does not know.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = Vec::new();
        let mut config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown.push(path.to_string());
        })?;
        for key in &unknown {
            tracing::warn!(key = %key, "Ignoring unknown config key");
        }
        config.normalize();
        Ok(config)
    }

    /// Apply overrides from a key lookup. `main` passes the process
    /// environment; tests pass a map.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.provider.api_key = Some(key);
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            self.provider.model = model;
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.provider.api_url = url;
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        if self
            .provider
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.provider.api_key = None;
        }
    }

    pub fn schema_json() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_reference_endpoint() {
        let c = Config::default();
        assert_eq!(c.provider.name, "nvidia");
        assert_eq!(c.provider.api_url, DEFAULT_API_URL);
        assert_eq!(c.provider.model, "meta/llama3-8b-instruct");
        assert_eq!(c.provider.timeout_secs, 60);
        assert!(c.provider.api_key.is_none());
        assert_eq!(c.gateway.port, 5000);
        assert_eq!(c.observability.backend, "log");
    }

    #[test]
    fn parses_partial_toml() {
        let c = Config::from_toml_str(
            r#"
[provider]
model = "meta/llama3-70b-instruct"

[gateway]
port = 8081
"#,
        )
        .unwrap();
        assert_eq!(c.provider.model, "meta/llama3-70b-instruct");
        assert_eq!(c.provider.api_url, DEFAULT_API_URL);
        assert_eq!(c.gateway.port, 8081);
        assert_eq!(c.gateway.host, "127.0.0.1");
    }

    #[test]
    fn unknown_keys_do_not_fail() {
        let c = Config::from_toml_str(
            r#"
[provider]
colour = "blue"

[cors]
origins = ["*"]
"#,
        )
        .unwrap();
        assert_eq!(c.provider.name, "nvidia");
    }

    #[test]
    fn blank_key_in_file_is_missing() {
        let c = Config::from_toml_str("[provider]\napi_key = \"   \"\n").unwrap();
        assert!(c.provider.api_key.is_none());
    }

    #[test]
    fn invalid_toml_is_error() {
        assert!(Config::from_toml_str("[provider\nname = ").is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_KEY_ENV, "nvapi-test"),
            (MODEL_ENV, "mistral/mixtral"),
            (API_URL_ENV, "http://localhost:9999/v1/chat/completions"),
        ]);
        let mut c = Config::default();
        c.apply_env_overrides_from(|k| env.get(k).map(ToString::to_string));
        assert_eq!(c.provider.api_key.as_deref(), Some("nvapi-test"));
        assert_eq!(c.provider.model, "mistral/mixtral");
        assert_eq!(
            c.provider.api_url,
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn empty_env_key_clears_to_missing() {
        let mut c = Config::default();
        c.provider.api_key = Some("from-file".into());
        c.apply_env_overrides_from(|k| (k == API_KEY_ENV).then(String::new));
        assert!(c.provider.api_key.is_none());
    }

    #[test]
    fn empty_env_model_keeps_configured() {
        let mut c = Config::default();
        c.apply_env_overrides_from(|k| (k == MODEL_ENV).then(|| "  ".to_string()));
        assert_eq!(c.provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let c = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(c.config_path(), path.as_path());
        assert_eq!(c.gateway.port, 5000);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway]\nhost = \"0.0.0.0\"\n").unwrap();
        let c = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(c.gateway.host, "0.0.0.0");
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = Config::schema_json().unwrap();
        assert!(schema.contains("provider"));
        assert!(schema.contains("gateway"));
        assert!(!schema.contains("config_path"));
    }
}
