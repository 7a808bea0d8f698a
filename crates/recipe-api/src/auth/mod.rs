// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication and authorization module.
//!
//! This module provides:
//! - Credential issuance and verification
//! - Cookie transport of the credential
//! - The per-request authentication context
//! - Role requirements and the authorization decision

mod claims;
mod codec;
mod context;
pub mod cookie;
mod error;
mod requirement;

pub use claims::{Claims, Identity, Role, UnknownRole};
pub use codec::{JwtConfig, MAX_EXPIRATION_SECS, TokenCodec, TokenVerifier, VerificationError};
pub use context::AuthContext;
pub use error::{AuthError, MSG_INVALID_TOKEN, MSG_NOT_AUTHENTICATED};
pub use requirement::{RoleRequirement, authorize};
