// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;

// =============================================================================
// ApiResponse
// =============================================================================

/// Success envelope: `{ "success": true, "message"?: ..., "data"?: ... }`.
///
/// Failures use [`ErrorResponseBody`](crate::error::ErrorResponseBody), which
/// shares the `success` and `message` fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`.
    pub success: bool,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    status: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response with data.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            status: None,
        }
    }

    /// Creates a `201 Created` response with data.
    pub fn created(data: T) -> Self {
        Self {
            status: Some(StatusCode::CREATED.as_u16()),
            ..Self::success(data)
        }
    }

    /// Adds a message to the response.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Creates a successful response carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            status: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self
            .status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

// =============================================================================
// Typed Responses
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// Current user as seen by the session endpoints.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// User ID.
    pub id: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: String,
    /// Always `true`.
    pub is_authenticated: bool,
    /// Credential expiry (Unix timestamp).
    pub expires_at: i64,
}

impl From<&AuthContext> for SessionResponse {
    fn from(ctx: &AuthContext) -> Self {
        Self {
            id: ctx.id().to_string(),
            email: ctx.email().to_string(),
            role: ctx.role().to_string(),
            is_authenticated: ctx.is_authenticated(),
            expires_at: ctx.user().exp,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
