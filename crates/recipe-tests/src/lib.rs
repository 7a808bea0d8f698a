// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Recipe Admin Integration Tests
//!
//! Shared fixtures and a router harness for the end-to-end suites under
//! `tests/`.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p recipe-tests
//! cargo test -p recipe-tests --test integration_auth
//! cargo test -p recipe-tests --test integration_routes
//! cargo test -p recipe-tests --test integration_config
//! ```
//!
//! ## Test Categories
//!
//! ### Auth Tests (`integration_auth.rs`)
//! - Credential gate in isolation (inner service call counting)
//! - Expiry, tampering and secret mismatch
//! - Verification idempotence
//!
//! ### Route Tests (`integration_routes.rs`)
//! - Role checks per route through the full router
//! - Session endpoints and banner management
//!
//! ### Config Tests (`integration_config.rs`)
//! - Loading files with `tempfile`
//! - Mapping into the API server configuration
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use recipe_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let app = TestApp::new();
//!     let admin = app.cookie_for(&Subjects::admin());
//!     let response = app.get("/api/v1/banners", Some(&admin)).await;
//!     assert_eq!(response.status, StatusCode::OK);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::{init_test_logging, temp_test_dir};
    pub use axum::http::StatusCode;
}
