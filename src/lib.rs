//! Minimal web MVC layer: controller discovery and request dispatch.
//!
//! The core lives in [`routing`]: controllers are registered in a
//! [`routing::ComponentCatalog`], scanned once into an immutable
//! [`routing::HandlerMapping`], and requests are resolved against it by exact
//! (path, method). [`http`] is an axum transport that drives the core, and
//! [`app`] is the demo application the `webmvc` binary serves.

pub mod admin;
pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod web;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HandlerExecution, HandlerMapping};
