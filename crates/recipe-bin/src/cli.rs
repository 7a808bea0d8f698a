// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `run`: Start the API server (default)
//! - `validate`: Validate configuration file
//! - `version`: Show version information
//! - `issue-token`: Mint a credential with the configured secret
//! - `gen-secret`: Generate a random signing secret

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recipe_api::Role;
use recipe_config::LoggingConfig;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Recipe admin backend.
///
/// Serves the admin REST API behind cookie-carried credentials and
/// per-route role checks.
#[derive(Parser, Debug)]
#[command(
    name = "recipe-admin",
    author = "Sylvex <contact@sylvex.io>",
    version = recipe_api::VERSION,
    about = "Recipe admin backend",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "recipe.yaml",
        env = "RECIPE_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, env = "RECIPE_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log format; overrides the config file
    #[arg(long, env = "RECIPE_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the API server
    ///
    /// This is the default command when no subcommand is specified.
    Run,

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration file without starting the server.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,

    /// Mint a credential signed with the configured secret
    ///
    /// Prints the token and the `Set-Cookie` header a login would send.
    #[command(name = "issue-token")]
    IssueToken(IssueTokenArgs),

    /// Generate a new random signing secret
    #[command(name = "gen-secret")]
    GenSecret(GenSecretArgs),
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation (secret redacted)
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `issue-token` command.
#[derive(Args, Debug, Clone)]
pub struct IssueTokenArgs {
    /// Subject user id
    #[arg(long)]
    pub user_id: String,

    /// Subject email
    #[arg(long)]
    pub email: String,

    /// Role granted by the credential (user, admin)
    #[arg(long)]
    pub role: Role,

    /// Validity window in seconds (default: auth.expiration_secs)
    #[arg(long)]
    pub expires_in: Option<i64>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `gen-secret` command.
#[derive(Args, Debug, Clone, Default)]
pub struct GenSecretArgs {
    /// Output encoding for the secret
    #[arg(short, long, default_value = "hex")]
    pub format: SecretFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<recipe_config::LogFormat> for LogFormat {
    fn from(format: recipe_config::LogFormat) -> Self {
        match format {
            recipe_config::LogFormat::Text => LogFormat::Text,
            recipe_config::LogFormat::Compact => LogFormat::Compact,
            recipe_config::LogFormat::Json => LogFormat::Json,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

/// Secret output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SecretFormat {
    /// Hexadecimal encoded
    #[default]
    Hex,
    /// Base64 encoded
    Base64,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Run` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }

    /// Check if verbose logging is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Get the effective log level.
    ///
    /// `-q`/`-v` win over `--log-level`, which wins over the config file.
    pub fn effective_log_level(&self, file: Option<&LoggingConfig>) -> String {
        if self.quiet {
            "warn".to_string()
        } else if self.verbose {
            "debug".to_string()
        } else if let Some(level) = &self.log_level {
            level.clone()
        } else {
            file.map(|l| l.level.as_str()).unwrap_or("info").to_string()
        }
    }

    /// Get the effective log format.
    pub fn effective_log_format(&self, file: Option<&LoggingConfig>) -> LogFormat {
        self.log_format
            .or_else(|| file.map(|l| l.format.into()))
            .unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================
