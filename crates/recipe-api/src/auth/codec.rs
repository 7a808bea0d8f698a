// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Signed credential issuance and verification.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Claims, Identity, Role};
use crate::error::{ApiError, ApiResult};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Longest accepted credential validity window (30 days).
pub const MAX_EXPIRATION_SECS: i64 = 30 * 24 * 60 * 60;

// =============================================================================
// JwtConfig
// =============================================================================

/// Credential signing configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Process-wide signing secret.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Optional issuer. When set, it is stamped on issued credentials and
    /// required on verified ones.
    pub issuer: Option<String>,
    /// Credential validity window in seconds.
    pub expiration_secs: i64,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set by user
            issuer: None,
            expiration_secs: 3600,
            leeway_secs: 0,
        }
    }
}

impl JwtConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the validity window. Windows beyond [`MAX_EXPIRATION_SECS`] fail
    /// [`validate`](Self::validate).
    pub fn with_expiration(mut self, duration: Duration) -> Self {
        self.expiration_secs = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        self
    }

    /// Sets the clock skew tolerance.
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("JWT secret is not configured"));
        }
        if self.expiration_secs <= 0 {
            return Err(ApiError::internal("JWT expiration must be positive"));
        }
        if self.expiration_secs > MAX_EXPIRATION_SECS {
            return Err(ApiError::internal(format!(
                "JWT expiration must not exceed {} seconds",
                MAX_EXPIRATION_SECS
            )));
        }
        if self.secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiration_secs", &self.expiration_secs)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

// =============================================================================
// VerificationError
// =============================================================================

/// Why a credential failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The credential is past its validity window.
    #[error("token has expired")]
    Expired,

    /// The credential structure, encoding or claims are invalid.
    #[error("token is malformed: {0}")]
    Malformed(String),

    /// The signature does not verify under the configured secret.
    #[error("token signature does not match the configured secret")]
    SecretMismatch,

    /// The cryptographic layer failed for another reason.
    #[error("unexpected verification failure: {0}")]
    Unexpected(String),
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => VerificationError::SecretMismatch,
            ErrorKind::ExpiredSignature => VerificationError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::ImmatureSignature => VerificationError::Malformed(err.to_string()),
            _ => VerificationError::Unexpected(err.to_string()),
        }
    }
}

// =============================================================================
// TokenVerifier
// =============================================================================

/// Asynchronous credential verification seam used by the authentication gate.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verifies a credential and returns the identity it encodes.
    async fn verify_token(&self, token: &str) -> Result<Identity, VerificationError>;
}

// =============================================================================
// TokenCodec
// =============================================================================

/// Issues and verifies HS256 credentials under a single secret.
#[derive(Clone)]
pub struct TokenCodec {
    config: Arc<JwtConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenCodec {
    /// Creates a new codec with the given configuration.
    pub fn new(config: JwtConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked in `verify_at` against an explicit clock.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "iss"]);
        }

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Signs the given claims.
    pub fn issue(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))
    }

    /// Issues a credential for a user using the configured validity window.
    pub fn issue_for(&self, user_id: &str, email: &str, role: Role) -> ApiResult<String> {
        let mut claims = Claims::new(user_id, email, role, self.config.expiration_secs);
        claims.iss = self.config.issuer.clone();
        self.issue(&claims)
    }

    /// Verifies a credential against the current time.
    pub fn verify(&self, token: &str) -> Result<Identity, VerificationError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a credential as of `now` (Unix timestamp).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Identity, VerificationError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.is_expired_at(now.saturating_sub(self.config.leeway_secs as i64)) {
            return Err(VerificationError::Expired);
        }

        Ok(Identity::verified(claims))
    }

    /// Returns the credential validity window in seconds.
    pub fn expiration_secs(&self) -> i64 {
        self.config.expiration_secs
    }

    /// Returns the configured issuer, if any.
    pub fn issuer(&self) -> Option<&str> {
        self.config.issuer.as_deref()
    }
}

#[async_trait]
impl TokenVerifier for TokenCodec {
    async fn verify_token(&self, token: &str) -> Result<Identity, VerificationError> {
        self.verify(token)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.config.issuer)
            .field("algorithm", &ALGORITHM)
            .field("expiration_secs", &self.config.expiration_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
