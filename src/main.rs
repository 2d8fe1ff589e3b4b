//! webmvc demo server.
//!
//! ```text
//! WEBMVC_CONFIG (optional TOML path)
//!     → config::load_config
//!     → observability (logging, metrics)
//!     → lifecycle::bootstrap (scan controllers, freeze mapping; fatal on error)
//!     → HttpServer (dispatch until SIGINT/SIGTERM)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use webmvc::config::{load_config, AppConfig};
use webmvc::lifecycle::{bootstrap, signals, Shutdown};
use webmvc::observability::{logging, metrics};

const CONFIG_ENV: &str = "WEBMVC_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_config(&PathBuf::from(path))?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("webmvc v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        base_locations = ?config.scan.base_locations,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let app = match bootstrap(config, &webmvc::app::catalog()) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup aborted");
            return Err(e.into());
        }
    };

    let shutdown = Arc::new(Shutdown::new());
    signals::forward_signals(Arc::clone(&shutdown));
    app.run(shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
