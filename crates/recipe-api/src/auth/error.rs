// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication and authorization failures.

use axum::http::StatusCode;
use thiserror::Error;

use super::{Role, VerificationError};
use crate::error::ApiError;

/// Message returned when no credential accompanies the request.
pub const MSG_NOT_AUTHENTICATED: &str = "User not authenticated";

/// Message returned when the credential fails verification.
pub const MSG_INVALID_TOKEN: &str = "Invalid token";

/// Outcome of a rejected authentication or authorization check.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `token` cookie, or an empty one.
    #[error("no credential supplied")]
    NoCredential,

    /// Signature, structure or expiry check failed.
    #[error("invalid credential: {0}")]
    InvalidCredential(#[source] VerificationError),

    /// Authenticated, but the role is outside the route's allowed set.
    #[error("role '{role}' is not permitted")]
    RoleDenied {
        /// The caller's role.
        role: Role,
    },

    /// A role check ran without an authenticated context.
    #[error("role check reached without an authenticated identity")]
    MissingIdentity,

    /// Verification failed for a reason outside the known taxonomy.
    #[error("unexpected verification failure: {0}")]
    UnexpectedVerificationFailure(String),
}

impl AuthError {
    /// Returns the HTTP status code for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::RoleDenied { .. } => StatusCode::FORBIDDEN,
            AuthError::NoCredential
            | AuthError::InvalidCredential(_)
            | AuthError::MissingIdentity
            | AuthError::UnexpectedVerificationFailure(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Returns the client-facing message. Never contains internal detail.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NoCredential | AuthError::MissingIdentity => MSG_NOT_AUTHENTICATED.to_string(),
            AuthError::InvalidCredential(_) | AuthError::UnexpectedVerificationFailure(_) => {
                MSG_INVALID_TOKEN.to_string()
            }
            AuthError::RoleDenied { role } => {
                format!("Access denied: role '{}' is not permitted for this resource", role)
            }
        }
    }
}

impl From<VerificationError> for AuthError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Unexpected(detail) => AuthError::UnexpectedVerificationFailure(detail),
            VerificationError::Expired
            | VerificationError::Malformed(_)
            | VerificationError::SecretMismatch => AuthError::InvalidCredential(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.user_message();
        match err.status_code() {
            StatusCode::FORBIDDEN => ApiError::forbidden(message),
            _ => ApiError::unauthorized(message),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
