// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # recipe-api
//!
//! REST API server for the recipe admin backend.
//!
//! This crate provides the HTTP API with cookie-carried JWT authentication,
//! per-route role authorization, and the banner and recipe category
//! management endpoints.
//!
//! Request flow: authentication gate ([`middleware::AuthLayer`]) attaches an
//! [`auth::AuthContext`], the role check ([`middleware::RoleLayer`]) admits
//! or refuses it, then the handler runs. Which checks an endpoint gets is
//! declared in [`routes::ROUTES`].

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod banners;
pub mod categories;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{AuthContext, AuthError, Claims, Identity, JwtConfig, Role, RoleRequirement, TokenCodec};
pub use config::{ApiConfig, CorsConfig};
pub use error::{ApiError, ApiResult};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
