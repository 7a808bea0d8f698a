// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `gen-secret` command.

use std::fs;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;

use crate::cli::{Cli, GenSecretArgs, SecretFormat};
use crate::error::{BinError, BinResult};

/// Length of generated secrets in bytes.
pub const SECRET_LEN: usize = 48;

/// Executes the `gen-secret` command.
pub fn gen_secret(_cli: &Cli, args: GenSecretArgs) -> BinResult<()> {
    let secret = generate(args.format);

    if let Some(path) = &args.output {
        fs::write(path, &secret).map_err(|e| {
            BinError::from(e).with_context(format!("Failed to write secret to {}", path.display()))
        })?;
        eprintln!("Secret written to: {}", path.display());
    } else {
        println!("{}", secret);
    }

    eprintln!();
    eprintln!("Store this secret securely and reference it from the config file:");
    eprintln!("  auth:");
    eprintln!("    secret: \"${{JWT_SECRET}}\"");
    eprintln!("or set RECIPE_JWT_SECRET. Rotating it invalidates every issued credential.");

    Ok(())
}

/// Generates a random secret in the requested encoding.
pub(crate) fn generate(format: SecretFormat) -> String {
    let mut bytes = [0u8; SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);

    match format {
        SecretFormat::Hex => hex::encode(bytes),
        SecretFormat::Base64 => STANDARD.encode(bytes),
    }
}
