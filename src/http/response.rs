//! Response rendering.
//!
//! # Responsibilities
//! - Render a `ModelAndView` (redirect, JSON model, template file)
//! - Apply status and header overrides set by the controller
//! - Map lookup misses and handler errors to status codes
//!
//! # Design Decisions
//! - Templates are served verbatim from the view root; no template engine
//! - View names that try to leave the view root are rejected with 404
//! - Invalid controller header overrides are logged and dropped

use std::path::{Component, Path, PathBuf};

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::web::{HandlerError, ModelAndView, View, WebResponse};

/// Render the controller's result.
pub async fn render(mav: ModelAndView, web_response: &WebResponse, view_root: &Path) -> Response {
    let mut response = match mav.view() {
        View::Redirect(location) => match HeaderValue::from_str(location) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(_) => {
                tracing::error!(location = %location, "Invalid redirect location");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        View::Json => Json(mav.model()).into_response(),
        View::Template(name) => render_template(name, view_root).await,
    };

    apply_overrides(&mut response, web_response);
    response
}

async fn render_template(name: &str, view_root: &Path) -> Response {
    let Some(path) = template_path(view_root, name) else {
        tracing::warn!(view = %name, "Rejected view name");
        return (StatusCode::NOT_FOUND, "View not found").into_response();
    };

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(view = %name, path = ?path, "View not found");
            (StatusCode::NOT_FOUND, "View not found").into_response()
        }
        Err(e) => {
            tracing::error!(view = %name, error = %e, "Failed to read view");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Resolve `name` under `root`, refusing anything but plain path segments.
fn template_path(root: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name.trim_start_matches('/'));
    if relative.as_os_str().is_empty()
        || !relative.components().all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

fn apply_overrides(response: &mut Response, web_response: &WebResponse) {
    if let Some(status) = web_response.status() {
        match StatusCode::from_u16(status) {
            Ok(status) => *response.status_mut() = status,
            Err(_) => tracing::warn!(status, "Ignoring invalid status override"),
        }
    }

    for (name, value) in web_response.headers() {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().append(name, value);
            }
            _ => tracing::warn!(header = %name, "Ignoring invalid header override"),
        }
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "No handler found").into_response()
}

pub fn handler_error(error: &HandlerError) -> Response {
    match error {
        HandlerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()).into_response(),
        HandlerError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
