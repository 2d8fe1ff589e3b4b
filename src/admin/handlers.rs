use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::routing::RouteInfo;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes: state.mapping.len(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteInfo>> {
    Json(state.mapping.routes())
}
