// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session handlers for the signed-in user.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::auth::cookie;
use crate::config::ApiConfig;
use crate::extractors::Auth;
use crate::response::{ApiResponse, SessionResponse};

// =============================================================================
// Current User
// =============================================================================

/// GET /api/v1/auth/me
///
/// Returns the identity carried by the request's credential.
pub async fn current_user(Auth(auth_ctx): Auth) -> impl IntoResponse {
    ApiResponse::success(SessionResponse::from(&auth_ctx))
}

// =============================================================================
// Logout
// =============================================================================

/// POST /api/v1/auth/logout
///
/// Clears the credential cookie. The credential itself stays valid until it
/// expires.
pub async fn logout(State(config): State<Arc<ApiConfig>>, Auth(auth_ctx): Auth) -> impl IntoResponse {
    tracing::info!(user_id = %auth_ctx.id(), "User logged out");

    (
        [(header::SET_COOKIE, cookie::clear_cookie(config.secure_cookie))],
        ApiResponse::message("Logged out successfully"),
    )
}

// =============================================================================
// Tests
// =============================================================================
