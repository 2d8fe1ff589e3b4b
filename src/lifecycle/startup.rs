//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Build the handler mapping from the component catalog
//! - Bind the listener and hand over to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The mapping is complete before the listener exists (traffic only when ready)

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{validate_config, AppConfig, ConfigError};
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::routing::{ComponentCatalog, HandlerMapping, ScanError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("handler mapping initialization failed: {0}")]
    Scan(#[from] ScanError),
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A validated config plus the frozen handler mapping.
pub struct Application {
    config: AppConfig,
    mapping: Arc<HandlerMapping>,
}

/// Validate `config` and build the handler mapping from `catalog`.
pub fn bootstrap(config: AppConfig, catalog: &ComponentCatalog) -> Result<Application, StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let mapping = HandlerMapping::initialize(catalog, &config.scan.base_locations)?;
    for route in mapping.routes() {
        tracing::info!(
            method = %route.method,
            path = %route.path,
            handler = %format!("{}::{}", route.controller, route.operation),
            "Mapped route"
        );
    }
    metrics::record_routes(mapping.len());

    Ok(Application {
        config,
        mapping: Arc::new(mapping),
    })
}

impl Application {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mapping(&self) -> &Arc<HandlerMapping> {
        &self.mapping
    }

    /// Bind the configured address and serve until `shutdown` fires.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
        let addr = self.config.server.bind_address.clone();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;

        HttpServer::new(self.config, self.mapping)
            .run(listener, shutdown)
            .await
            .map_err(StartupError::Serve)
    }
}
