// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures

use chrono::Utc;
use recipe_api::{ApiConfig, Claims, JwtConfig, Role, TokenCodec};
use serde_json::{Value, json};

/// Signing secret shared by the fixtures.
pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-must-be-at-least-32-chars";

/// A different secret, for signature mismatch cases.
pub const OTHER_SECRET: &str = "another-secret-key-that-is-also-long-enough-to-use";

// =============================================================================
// Subjects
// =============================================================================

/// A credential subject.
#[derive(Debug, Clone)]
pub struct Subject {
    /// User id.
    pub user_id: &'static str,
    /// Email.
    pub email: &'static str,
    /// Role.
    pub role: Role,
}

/// Well-known subjects.
pub struct Subjects;

impl Subjects {
    /// The administrator `u1 / a@example.com`.
    pub fn admin() -> Subject {
        Subject {
            user_id: "u1",
            email: "a@example.com",
            role: Role::Admin,
        }
    }

    /// A regular user `u2 / b@example.com`.
    pub fn user() -> Subject {
        Subject {
            user_id: "u2",
            email: "b@example.com",
            role: Role::User,
        }
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Credential helpers.
pub struct JwtFixtures;

impl JwtFixtures {
    /// Signing configuration using [`TEST_SECRET`].
    pub fn config() -> JwtConfig {
        JwtConfig::new(TEST_SECRET)
    }

    /// Codec using [`TEST_SECRET`].
    pub fn codec() -> TokenCodec {
        TokenCodec::new(Self::config()).expect("valid test secret")
    }

    /// Codec using [`OTHER_SECRET`].
    pub fn other_codec() -> TokenCodec {
        TokenCodec::new(JwtConfig::new(OTHER_SECRET)).expect("valid test secret")
    }

    /// Claims for `subject` issued at `iat`, valid for `ttl` seconds.
    pub fn claims_at(subject: &Subject, iat: i64, ttl: i64) -> Claims {
        Claims::issued_at(subject.user_id, subject.email, subject.role, iat, ttl)
    }

    /// A credential that expired an hour ago.
    pub fn expired_token(codec: &TokenCodec, subject: &Subject) -> String {
        let iat = Utc::now().timestamp() - 7200;
        codec
            .issue(&Self::claims_at(subject, iat, 3600))
            .expect("token issued")
    }

    /// Flips one character of the signature segment.
    pub fn tamper(token: &str) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        let last = chars.len() - 2;
        chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }
}

// =============================================================================
// API configuration
// =============================================================================

/// API server configuration helpers.
pub struct ApiFixtures;

impl ApiFixtures {
    /// Default API configuration signed with [`TEST_SECRET`].
    pub fn config() -> ApiConfig {
        ApiConfig::default().with_jwt(JwtFixtures::config())
    }
}

// =============================================================================
// Config files
// =============================================================================

/// Config file contents.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// A complete YAML configuration.
    pub fn yaml() -> String {
        format!(
            r#"
server:
  host: 127.0.0.1
  port: 8081
  request_timeout_secs: 15
  cors_origins:
    - http://localhost:5173
auth:
  secret: "{TEST_SECRET}"
  issuer: recipe-admin
  expiration_secs: 900
  secure_cookie: false
logging:
  level: debug
  format: compact
"#
        )
    }

    /// A YAML configuration whose secret comes from `${JWT_SECRET}`.
    pub fn yaml_with_placeholder() -> String {
        "server:\n  port: ${PORT:8082}\nauth:\n  secret: \"${JWT_SECRET}\"\n".to_string()
    }

    /// The same settings as [`Self::yaml`], in TOML.
    pub fn toml() -> String {
        format!(
            r#"
[server]
host = "127.0.0.1"
port = 8081

[auth]
secret = "{TEST_SECRET}"
expiration_secs = 900
"#
        )
    }
}

// =============================================================================
// Banners
// =============================================================================

/// Banner payloads.
pub struct BannerFixtures;

impl BannerFixtures {
    /// A valid creation payload.
    pub fn new_banner(title: &str) -> Value {
        json!({
            "title": title,
            "subtitle": "Seasonal picks",
            "imageUrl": format!("https://cdn.example.com/{}.jpg", title.to_lowercase()),
            "linkUrl": "/recipes/seasonal",
        })
    }

    /// A payload that fails validation.
    pub fn invalid_banner() -> Value {
        json!({ "title": "  ", "imageUrl": "" })
    }
}

// =============================================================================
// Category Fixtures
// =============================================================================

/// Recipe category and sub-category payloads.
pub struct CategoryFixtures;

impl CategoryFixtures {
    /// A valid category creation payload.
    pub fn new_category(name: &str) -> Value {
        json!({
            "name": name,
            "description": format!("{} recipes", name),
            "imageUrl": format!("https://cdn.example.com/categories/{}.jpg", name.to_lowercase()),
        })
    }

    /// A valid sub-category creation payload under `category_id`.
    pub fn new_sub_category(category_id: &str, name: &str) -> Value {
        json!({
            "categoryId": category_id,
            "name": name,
        })
    }
}
