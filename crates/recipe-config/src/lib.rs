// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # recipe-config
//!
//! Configuration management for the recipe admin backend.
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_config::loader::load_config;
//!
//! let config = load_config("recipe.yaml").unwrap();
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```
//!
//! ## Configuration Schema
//!
//! - `server` - bind address, request timeout, CORS origins
//! - `auth` - signing secret, issuer, credential lifetime, cookie flags
//! - `logging` - level and output format
//!
//! Values in config files can reference environment variables:
//!
//! ```yaml
//! auth:
//!   secret: "${JWT_SECRET}"
//! server:
//!   port: "${PORT:8080}"
//! ```
//!
//! `RECIPE_*` environment variables override file values; see
//! [`loader`] for the full list.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, DEFAULT_ENV_PREFIX, load_config, load_config_str};
pub use schema::{
    AppConfig, AuthConfig, LogFormat, LogLevel, LoggingConfig, SecretValue, ServerConfig,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::loader::{ConfigLoader, load_config};
    pub use crate::schema::{AppConfig, SecretValue};
}
