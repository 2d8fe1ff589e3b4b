//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Convert an HTTP request into the transport-neutral `WebRequest`
//! - Collect query and url-encoded form parameters
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The path is passed through exactly as received; normalization is the client's job
//! - Query parameters are read before form parameters, so the query wins on repeats

use axum::http::{header::CONTENT_TYPE, request::Parts, HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::web::WebRequest;

pub const X_REQUEST_ID: &str = "x-request-id";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Generates a UUID v4 for requests that arrive without an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID set by the middleware, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Build the `WebRequest` a controller sees.
pub fn to_web_request(parts: &Parts, body: &[u8]) -> WebRequest {
    let mut request = WebRequest::new(parts.method.as_str(), parts.uri.path());

    if let Some(query) = parts.uri.query() {
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            request.add_parameter(name, value);
        }
    }
    if is_form(&parts.headers) {
        for (name, value) in form_urlencoded::parse(body) {
            request.add_parameter(name, value);
        }
    }
    for (name, value) in &parts.headers {
        if let Ok(value) = value.to_str() {
            request.add_header(name.as_str(), value);
        }
    }

    request
}
