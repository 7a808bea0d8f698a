// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication context.

use serde::Serialize;
use uuid::Uuid;

use super::{Claims, Identity, Role};

/// Identity attached to a request after successful authentication.
///
/// The authentication gate inserts this into the request extensions exactly
/// once. Handlers receive a clone and can trust every field without
/// re-verifying the credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    id: String,
    user: Claims,
    email: String,
    role: Role,
    is_authenticated: bool,
    #[serde(skip)]
    request_id: Uuid,
}

impl AuthContext {
    /// Creates a context from a verified identity.
    pub fn from_identity(identity: Identity) -> Self {
        let claims = identity.into_claims();
        Self {
            id: claims.user_id.clone(),
            email: claims.email.clone(),
            role: claims.role,
            user: claims,
            is_authenticated: true,
            request_id: Uuid::now_v7(),
        }
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// User ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full verified claims.
    pub fn user(&self) -> &Claims {
        &self.user
    }

    /// User email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// User role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Always `true` for a context produced by the gate.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Request ID for log correlation.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Returns `true` if the context has any of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Returns `true` if this context has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Tests
// =============================================================================
