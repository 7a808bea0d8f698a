// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! recipe-admin binary entry point.

use recipe_bin::{Cli, commands, error::report_error_and_exit, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Logging settings from the config file, when it loads. Load errors are
    // reported by the command itself.
    let file_logging = recipe_config::load_config(&cli.config)
        .ok()
        .map(|config| config.logging);

    if let Err(e) = init_logging(
        &cli.effective_log_level(file_logging.as_ref()),
        cli.effective_log_format(file_logging.as_ref()),
    ) {
        report_error_and_exit(e);
    }

    if let Err(e) = commands::execute(cli).await {
        report_error_and_exit(e);
    }
}
