// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema for the recipe admin backend.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   request_timeout_secs: 30
//!   cors_origins: ["https://admin.example.com"]
//! auth:
//!   secret: "${JWT_SECRET}"
//!   expiration_secs: 3600
//! logging:
//!   level: info
//!   format: text
//! ```

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default API port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default credential validity window in seconds.
pub const DEFAULT_EXPIRATION_SECS: i64 = 3600;

/// Recommended minimum secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted credential validity window (30 days).
pub const MAX_EXPIRATION_SECS: i64 = 30 * 24 * 60 * 60;

// =============================================================================
// AppConfig
// =============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Credential settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the whole configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

// =============================================================================
// ServerConfig
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Origins allowed to call the API with credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Returns the parsed bind address.
    pub fn ip_addr(&self) -> ConfigResult<IpAddr> {
        self.host
            .parse()
            .map_err(|_| ConfigError::validation("server.host", format!("invalid IP address '{}'", self.host)))
    }

    /// Validates the server settings.
    pub fn validate(&self) -> ConfigResult<()> {
        self.ip_addr()?;
        if self.port == 0 {
            return Err(ConfigError::validation("server.port", "must be non-zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout_secs",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout() -> u64 {
    30
}

// =============================================================================
// AuthConfig
// =============================================================================

/// Credential settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Process-wide signing secret.
    #[serde(default)]
    pub secret: SecretValue,

    /// Optional issuer stamped on and required from credentials.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Credential validity window in seconds.
    #[serde(default = "default_expiration")]
    pub expiration_secs: i64,

    /// Clock skew tolerance in seconds.
    #[serde(default)]
    pub leeway_secs: u64,

    /// Whether credential cookies carry the `Secure` attribute.
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
}

impl AuthConfig {
    /// Validates the credential settings.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.secret.is_empty() {
            return Err(ConfigError::missing_field("auth.secret"));
        }
        if self.secret.is_unresolved() {
            return Err(ConfigError::validation(
                "auth.secret",
                "references an environment variable that is not set",
            ));
        }
        if self.expiration_secs <= 0 {
            return Err(ConfigError::validation("auth.expiration_secs", "must be positive"));
        }
        if self.expiration_secs > MAX_EXPIRATION_SECS {
            return Err(ConfigError::validation(
                "auth.expiration_secs",
                format!("must not exceed {} seconds", MAX_EXPIRATION_SECS),
            ));
        }
        if self.secret.len() < MIN_SECRET_LEN {
            tracing::warn!(
                min_len = MIN_SECRET_LEN,
                "auth.secret is shorter than recommended"
            );
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: SecretValue::default(),
            issuer: None,
            expiration_secs: default_expiration(),
            leeway_secs: 0,
            secure_cookie: true,
        }
    }
}

fn default_expiration() -> i64 {
    DEFAULT_EXPIRATION_SECS
}

fn default_true() -> bool {
    true
}

// =============================================================================
// LoggingConfig
// =============================================================================

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Validates the logging configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the level name as used by env filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON format for production.
    Json,
}

impl LogFormat {
    /// Returns the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

// =============================================================================
// Secret Value
// =============================================================================

/// A secret string that never appears in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(String);

impl SecretValue {
    /// Creates a new secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the plain secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the secret length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the value is still a `${VAR}` placeholder.
    pub fn is_unresolved(&self) -> bool {
        self.0.starts_with("${") && self.0.ends_with('}')
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretValue(***)")
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}
