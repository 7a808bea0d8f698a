// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server runtime orchestration.
//!
//! Turns a loaded [`AppConfig`] into the API server's configuration, starts
//! the server and keeps it running until a shutdown signal arrives.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use recipe_api::{ApiConfig, ApiServer, ApiServerBuilder, CorsConfig, JwtConfig};
use recipe_config::{AppConfig, load_config};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// Config Mapping
// =============================================================================

/// Maps the file configuration onto the API server configuration.
pub fn api_config(config: &AppConfig) -> BinResult<ApiConfig> {
    let host = config.server.ip_addr()?;

    let mut jwt = JwtConfig::new(config.auth.secret.expose()).with_leeway(config.auth.leeway_secs);
    jwt.expiration_secs = config.auth.expiration_secs;
    if let Some(issuer) = &config.auth.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }

    Ok(ApiConfig::new()
        .with_host(host)
        .with_port(config.server.port)
        .with_jwt(jwt)
        .with_cors(CorsConfig::with_origins(config.server.cors_origins.clone()))
        .with_secure_cookie(config.auth.secure_cookie)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs)))
}

// =============================================================================
// AdminRuntime
// =============================================================================

/// Runs the API server until shutdown is signaled.
pub struct AdminRuntime {
    config: Arc<AppConfig>,
    shutdown: ShutdownCoordinator,
}

impl AdminRuntime {
    /// Creates a new runtime.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            shutdown: ShutdownCoordinator::new(),
        }
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Builds the API server from the runtime configuration.
    pub fn build_server(&self) -> BinResult<ApiServer> {
        let server = ApiServerBuilder::new()
            .config(api_config(&self.config)?)
            .build()
            .map_err(|e| BinError::from(e).with_context("Failed to build API server"))?;
        Ok(server)
    }

    /// Runs the server until an OS signal or manual shutdown.
    pub async fn run(self) -> BinResult<()> {
        info!("Starting recipe admin backend v{}", recipe_api::VERSION);

        let server = self.build_server()?;
        info!(
            addr = %server.addr(),
            secure_cookie = self.config.auth.secure_cookie,
            cors_origins = self.config.server.cors_origins.len(),
            "Recipe admin backend is ready"
        );

        let coordinator = self.shutdown.clone();
        let signals = tokio::spawn(async move {
            if let Err(e) = coordinator.wait_for_shutdown().await {
                error!("Failed to install signal handlers: {}", e);
                coordinator.initiate_shutdown();
            }
        });

        let result = server.run_with_shutdown(self.shutdown.shutdown_signal()).await;
        signals.abort();

        info!("Recipe admin backend shutdown complete");
        result.map_err(BinError::from)
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for constructing the runtime.
#[derive(Default)]
pub struct RuntimeBuilder {
    config_path: Option<PathBuf>,
    config: Option<AppConfig>,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration file path.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configuration directly.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> BinResult<AdminRuntime> {
        let config = match self.config {
            Some(config) => config,
            None => {
                let path = self
                    .config_path
                    .ok_or_else(|| BinError::config("No configuration provided"))?;

                load_config(&path).map_err(|e| {
                    BinError::from(e)
                        .with_context(format!("Failed to load config from {}", path.display()))
                })?
            }
        };

        Ok(AdminRuntime::new(config))
    }
}
