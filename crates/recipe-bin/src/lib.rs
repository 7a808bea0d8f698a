// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # recipe-bin
//!
//! Command-line entry point for the recipe admin backend.
//!
//! ```text
//! main.rs ─▶ cli.rs ─▶ commands ─▶ runtime ─▶ recipe-api server
//!                         │            │
//!                      logging      shutdown
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (default command)
//! recipe-admin -c /etc/recipe/recipe.yaml
//!
//! # Validate configuration
//! recipe-admin validate --strict
//!
//! # Generate a signing secret
//! recipe-admin gen-secret -f base64
//!
//! # Mint an admin credential for local testing
//! recipe-admin issue-token --user-id u1 --email a@example.com --role admin
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use runtime::{AdminRuntime, RuntimeBuilder};
pub use shutdown::ShutdownCoordinator;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
