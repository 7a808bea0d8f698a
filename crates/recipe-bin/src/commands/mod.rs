// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.

mod gen_secret;
mod issue_token;
mod run;
mod validate;
mod version;

pub use gen_secret::gen_secret;
pub use issue_token::issue_token;
pub use run::run;
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands};
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Run => run::run(&cli).await,
        Commands::Validate(args) => validate::validate(&cli, args),
        Commands::Version => version::version(&cli),
        Commands::IssueToken(args) => issue_token::issue_token(&cli, args),
        Commands::GenSecret(args) => gen_secret::gen_secret(&cli, args),
    }
}
