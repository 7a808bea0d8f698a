// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use std::path::Path;

use recipe_config::{AppConfig, SecretValue, load_config, schema::MIN_SECRET_LEN};

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    let config = load_config(config_path)
        .map_err(|e| BinError::from(e).with_context("Configuration validation failed"))?;

    let warnings = collect_warnings(&config);

    match args.format {
        OutputFormat::Text => print_text(config_path, &config, &warnings, args.show_config),
        OutputFormat::Json => print_json(config_path, &config, &warnings, args.show_config)?,
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::config(format!(
            "Strict mode: {} warning(s) found",
            warnings.len()
        )));
    }

    Ok(())
}

/// Returns human-readable warnings for a valid but questionable config.
pub(crate) fn collect_warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.auth.secret.len() < MIN_SECRET_LEN {
        warnings.push(format!(
            "auth.secret is shorter than {} bytes",
            MIN_SECRET_LEN
        ));
    }
    if !config.auth.secure_cookie {
        warnings.push("auth.secure_cookie is disabled; cookies will be sent over plain HTTP".into());
    }
    if config.server.cors_origins.is_empty() {
        warnings.push("No CORS origins configured; browsers on other origins cannot call the API".into());
    }
    if config.server.cors_origins.iter().any(|o| o == "*") {
        warnings.push("Wildcard CORS origin disables credentialed requests".into());
    }

    warnings
}

fn redacted(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    config.auth.secret = SecretValue::new("***");
    config
}

fn print_text(path: &Path, config: &AppConfig, warnings: &[String], show_config: bool) {
    println!("✓ Configuration is valid: {}", path.display());
    println!();
    println!("Summary:");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Request timeout: {}s", config.server.request_timeout_secs);
    println!("  CORS origins: {}", config.server.cors_origins.len());
    println!("  Credential lifetime: {}s", config.auth.expiration_secs);
    println!(
        "  Issuer: {}",
        config.auth.issuer.as_deref().unwrap_or("(none)")
    );
    println!("  Secure cookie: {}", config.auth.secure_cookie);

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in warnings {
            println!("  ⚠ {}", warning);
        }
    }

    if show_config {
        println!();
        println!("Parsed configuration:");
        println!(
            "{}",
            serde_json::to_string_pretty(&redacted(config))
                .unwrap_or_else(|_| "(serialization error)".to_string())
        );
    }
}

fn print_json(
    path: &Path,
    config: &AppConfig,
    warnings: &[String],
    show_config: bool,
) -> BinResult<()> {
    let output = serde_json::json!({
        "valid": true,
        "config_path": path.display().to_string(),
        "summary": {
            "host": config.server.host,
            "port": config.server.port,
            "cors_origins": config.server.cors_origins.len(),
            "expiration_secs": config.auth.expiration_secs,
            "secure_cookie": config.auth.secure_cookie,
        },
        "warnings": warnings,
        "config": if show_config { Some(redacted(config)) } else { None },
    });

    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| BinError::runtime(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
