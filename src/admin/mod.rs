//! Admin API: read-only introspection of the running server.
//!
//! Routes (all behind bearer-token auth):
//! - `GET /admin/status`
//! - `GET /admin/routes`

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
