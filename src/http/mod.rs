//! HTTP transport adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, fallback dispatch)
//!     → request.rs (request ID, convert to WebRequest)
//!     → [handler mapping resolves, HandlerExecution runs]
//!     → response.rs (render ModelAndView / map errors to status codes)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
