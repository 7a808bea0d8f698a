// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-route role requirements and the authorization decision.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::{AuthContext, AuthError, Role};

/// Set of roles permitted to invoke a route.
///
/// Declared once at router construction and shared immutably afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRequirement {
    allowed: Arc<BTreeSet<Role>>,
}

impl RoleRequirement {
    /// Creates a requirement from the allowed roles.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: Arc::new(roles.into_iter().collect()),
        }
    }

    /// Requirement admitting administrators only.
    pub fn admin_only() -> Self {
        Self::new([Role::Admin])
    }

    /// Returns `true` if the role is in the allowed set.
    pub fn permits(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Iterates over the allowed roles.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.allowed.iter().copied()
    }
}

impl From<&[Role]> for RoleRequirement {
    fn from(roles: &[Role]) -> Self {
        Self::new(roles.iter().copied())
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.allowed.iter().map(Role::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Decides whether an authenticated request may proceed.
///
/// A missing context means the check was wired without the authentication
/// gate in front of it; that request is refused rather than let through.
pub fn authorize(ctx: Option<&AuthContext>, requirement: &RoleRequirement) -> Result<(), AuthError> {
    let ctx = ctx.ok_or(AuthError::MissingIdentity)?;

    if requirement.permits(ctx.role()) {
        Ok(())
    } else {
        Err(AuthError::RoleDenied { role: ctx.role() })
    }
}

// =============================================================================
// Tests
// =============================================================================
