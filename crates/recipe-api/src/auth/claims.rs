// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential claims and the closed role set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// Roles known to the admin backend.
///
/// A credential carrying any other role string fails to decode and is
/// rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular platform user.
    User,
    /// Administrator of categories, recipes and banners.
    Admin,
}

impl Role {
    /// All known roles.
    pub const ALL: &'static [Role] = &[Role::User, Role::Admin];

    /// Returns the role name as it appears in credentials.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error returned when parsing a role name outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected one of: user, admin)")]
pub struct UnknownRole(pub String);

// =============================================================================
// Claims
// =============================================================================

/// Payload embedded in a credential.
///
/// Field names follow the wire format used by the admin console
/// (`userId`, `email`, `role`, `iat`, `exp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User identifier.
    pub user_id: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: Role,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Creates claims valid for `expires_in_secs` from now.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        expires_in_secs: i64,
    ) -> Self {
        Self::issued_at(user_id, email, role, Utc::now().timestamp(), expires_in_secs)
    }

    /// Creates claims issued at an explicit time. The expiry saturates at
    /// `i64::MAX` rather than overflowing.
    pub fn issued_at(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        iat: i64,
        expires_in_secs: i64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
            iat,
            exp: iat.saturating_add(expires_in_secs),
            iss: None,
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// Returns `true` if the claims are expired at `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Returns the expiration time as a DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

// =============================================================================
// Identity
// =============================================================================

/// Claims that passed signature and expiry verification.
///
/// Only the token codec (or another [`TokenVerifier`](super::TokenVerifier)
/// inside this crate) can produce an `Identity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    claims: Claims,
}

impl Identity {
    pub(crate) fn verified(claims: Claims) -> Self {
        Self { claims }
    }

    /// Returns the verified claims.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Returns the user ID.
    pub fn user_id(&self) -> &str {
        &self.claims.user_id
    }

    /// Returns the email.
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Consumes the identity, returning the claims.
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}

// =============================================================================
// Tests
// =============================================================================
