//! Configuration handling for the application.
//!
//! Everything environment-derived is read exactly once in `Config::from_env`
//! and then handed to constructors. Business logic never consults the
//! process environment directly.

use std::env;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Environment variable names. Public so tests and tooling can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_AI_PROVIDER: &str = "AI_PROVIDER";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_API_BASE: &str = "OPENAI_API_BASE";
pub const ENV_CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

/// Default values used when optional environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com";
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Which LLM backend performs the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Printed in place of API keys.
pub const REDACTED: &str = "<redacted>";

/// Everything a provider needs to talk to its API.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl ProviderConfig {
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Gemini,
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }

    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
        }
    }

    /// Point the provider at a different host (a proxy, or a mock server in tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &REDACTED)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    provider: ProviderConfig,
    allowed_origins: Vec<String>,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(bind_addr: impl Into<String>, provider: ProviderConfig) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            provider,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Load from environment variables.
    ///
    /// Fails when the provider name is unknown or when the selected
    /// provider's API key is unset, so a misconfigured service never starts
    /// accepting requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let kind: ProviderKind = env::var(ENV_AI_PROVIDER)
            .unwrap_or_else(|_| DEFAULT_PROVIDER.to_string())
            .parse()?;

        let provider = match kind {
            ProviderKind::Gemini => ProviderConfig {
                kind,
                api_key: required(ENV_GEMINI_API_KEY)?,
                model: optional(ENV_GEMINI_MODEL, DEFAULT_GEMINI_MODEL),
                api_base: optional(ENV_GEMINI_API_BASE, DEFAULT_GEMINI_API_BASE),
            },
            ProviderKind::OpenAi => ProviderConfig {
                kind,
                api_key: required(ENV_OPENAI_API_KEY)?,
                model: optional(ENV_OPENAI_MODEL, DEFAULT_OPENAI_MODEL),
                api_base: optional(ENV_OPENAI_API_BASE, DEFAULT_OPENAI_API_BASE),
            },
        };
        url::Url::parse(&provider.api_base).map_err(|e| ConfigError::InvalidValue {
            field: "api_base",
            reason: e.to_string(),
        })?;

        let mut config = Self::new(bind_addr, provider);
        if let Ok(raw) = env::var(ENV_CORS_ALLOWED_ORIGINS) {
            let origins: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
            if origins.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: ENV_CORS_ALLOWED_ORIGINS,
                    reason: "no origins listed".to_string(),
                });
            }
            config.allowed_origins = origins;
        }
        Ok(config)
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Settings for the configured analysis provider.
    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }
    /// Origins allowed by the CORS layer.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingValue { field: key }),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Errors that can occur while building a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedProvider(String),
    MissingValue { field: &'static str },
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnsupportedProvider(name) => {
                write!(f, "Unsupported AI provider: {}", name)
            }
            ConfigError::MissingValue { field } => {
                write!(f, "{} is not set in environment variables.", field)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
