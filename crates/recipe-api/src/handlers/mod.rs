// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`health`]: liveness check
//! - [`session`]: current user and logout
//! - [`banners`]: banner management
//! - [`categories`]: recipe categories and sub-categories

mod banners;
mod categories;
mod health;
mod session;

pub use banners::*;
pub use categories::*;
pub use health::*;
pub use session::*;
