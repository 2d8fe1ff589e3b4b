//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the admin API and the dispatch fallback
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener with graceful shutdown
//! - Dispatch requests through the handler mapping
//! - Observability (metrics, correlation IDs)

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::AppConfig;
use crate::http::request::{request_id, to_web_request, UuidRequestId};
use crate::http::response;
use crate::observability::metrics::{self, Outcome};
use crate::routing::HandlerMapping;
use crate::web::WebResponse;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mapping: Arc<HandlerMapping>,
    pub config: Arc<AppConfig>,
}

/// HTTP transport in front of a handler mapping.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    pub fn new(config: AppConfig, mapping: Arc<HandlerMapping>) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            mapping,
            config: Arc::clone(&config),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new();
        if config.admin.enabled {
            router = router.merge(admin::setup_admin_router(state.clone()));
        }

        router
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router (used by tests to drive requests without a socket).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: resolve through the handler mapping, invoke, render.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers());
    let (parts, body) = request.into_parts();
    let method = parts.method.to_string();

    let body = match axum::body::to_bytes(body, state.config.server.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            metrics::record_request(&method, Outcome::Failed, 413, start_time);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };
    let web_request = to_web_request(&parts, &body);

    let execution = match state.mapping.resolve(&web_request) {
        Ok(execution) => execution,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "No handler matched");
            metrics::record_request(&method, Outcome::NotFound, 404, start_time);
            return response::not_found();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %web_request.path(),
        controller = execution.controller(),
        operation = execution.operation(),
        "Dispatching request"
    );

    let mut web_response = WebResponse::new();
    match execution.handle(&web_request, &mut web_response) {
        Ok(mav) => {
            let view_root = Path::new(&state.config.views.root);
            let response = response::render(mav, &web_response, view_root).await;
            metrics::record_request(&method, Outcome::Handled, response.status().as_u16(), start_time);
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                operation = execution.operation(),
                error = %e,
                "Handler failed"
            );
            let response = response::handler_error(&e);
            metrics::record_request(&method, Outcome::Failed, response.status().as_u16(), start_time);
            response
        }
    }
}
