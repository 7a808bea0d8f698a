// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the API server.
//!
//! - [`AuthMiddleware`]: cookie credential authentication
//! - [`RoleMiddleware`]: role authorization, composed after authentication

mod auth;
mod role;

pub use auth::{AuthLayer, AuthMiddleware, authenticate};
pub use role::{RoleLayer, RoleMiddleware};
