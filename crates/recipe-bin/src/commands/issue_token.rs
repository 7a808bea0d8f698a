// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `issue-token` command.

use recipe_api::auth::cookie::session_cookie;
use recipe_api::auth::MAX_EXPIRATION_SECS;
use recipe_api::{Claims, TokenCodec};
use recipe_config::load_config;

use crate::cli::{Cli, IssueTokenArgs, OutputFormat};
use crate::error::{BinError, BinResult};
use crate::runtime::api_config;

/// A minted credential and the cookie header carrying it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Signed credential.
    pub token: String,
    /// `Set-Cookie` value.
    pub set_cookie: String,
    /// Claims embedded in the credential.
    pub claims: Claims,
}

/// Executes the `issue-token` command.
pub fn issue_token(cli: &Cli, args: IssueTokenArgs) -> BinResult<()> {
    let config = load_config(&cli.config)?;
    let api = api_config(&config)?;
    let secure = api.secure_cookie;
    let codec = TokenCodec::new(api.jwt)?;

    let issued = mint(&codec, &args, secure)?;

    match args.format {
        OutputFormat::Text => {
            println!("{}", issued.token);
            eprintln!();
            eprintln!("Set-Cookie: {}", issued.set_cookie);
            if let Some(expires_at) = issued.claims.expires_at() {
                eprintln!("Expires:    {}", expires_at.to_rfc3339());
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "token": issued.token,
                "setCookie": issued.set_cookie,
                "claims": issued.claims,
            });
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|e| BinError::runtime(format!("Failed to render output: {}", e)))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Signs a credential for the requested subject.
pub(crate) fn mint(codec: &TokenCodec, args: &IssueTokenArgs, secure: bool) -> BinResult<IssuedToken> {
    let expires_in = args.expires_in.unwrap_or_else(|| codec.expiration_secs());
    if !(1..=MAX_EXPIRATION_SECS).contains(&expires_in) {
        return Err(BinError::config(format!(
            "--expires-in must be between 1 and {} seconds",
            MAX_EXPIRATION_SECS
        )));
    }

    let mut claims = Claims::new(&args.user_id, &args.email, args.role, expires_in);
    claims.iss = codec.issuer().map(str::to_string);

    let token = codec.issue(&claims)?;
    let set_cookie = session_cookie(&token, expires_in, secure);

    Ok(IssuedToken {
        token,
        set_cookie,
        claims,
    })
}
