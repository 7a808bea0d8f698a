// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::banners::BannerStore;
use crate::categories::CategoryStore;
use crate::config::ApiConfig;
use crate::error::ApiResult;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Credential codec.
    pub codec: TokenCodec,
    /// Banner store.
    pub banners: Arc<BannerStore>,
    /// Recipe category store.
    pub categories: Arc<CategoryStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the credential codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Returns the banner store.
    pub fn banners(&self) -> &BannerStore {
        &self.banners
    }

    /// Returns the recipe category store.
    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("addr", &self.config.socket_addr())
            .field("codec", &self.codec)
            .field("banners", &self.banners.len())
            .field("categories", &self.categories.len())
            .finish()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    codec: Option<TokenCodec>,
    banners: Option<Arc<BannerStore>>,
    categories: Option<Arc<CategoryStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the credential codec. Defaults to one built from `config.jwt`.
    pub fn codec(mut self, codec: TokenCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Sets the banner store.
    pub fn banners(mut self, banners: Arc<BannerStore>) -> Self {
        self.banners = Some(banners);
        self
    }

    /// Sets the recipe category store.
    pub fn categories(mut self, categories: Arc<CategoryStore>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Builds the AppState.
    ///
    /// Fails if no codec was given and the configured secret is unusable.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let codec = match self.codec {
            Some(codec) => codec,
            None => TokenCodec::new(config.jwt.clone())?,
        };

        Ok(AppState {
            config: Arc::new(config),
            codec,
            banners: self.banners.unwrap_or_default(),
            categories: self.categories.unwrap_or_default(),
        })
    }
}

// =============================================================================
// FromRef implementations for extracting parts of state
// =============================================================================

impl axum::extract::FromRef<AppState> for Arc<BannerStore> {
    fn from_ref(state: &AppState) -> Self {
        state.banners.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<CategoryStore> {
    fn from_ref(state: &AppState) -> Self {
        state.categories.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<ApiConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
