//! Transport-neutral request, response and view types.
//!
//! # Data Flow
//! ```text
//! transport request
//!     → request.rs (WebRequest: method, path, parameters, headers)
//!     → [handler mapping resolves, controller runs]
//!     → response.rs (WebResponse: status/header overrides)
//!     → view.rs (ModelAndView returned by the controller)
//!     → transport renders
//! ```
//!
//! # Design Decisions
//! - No dependency on the HTTP framework: the core never sees axum types
//! - View results are opaque instructions, interpreted only by the transport

pub mod request;
pub mod response;
pub mod view;

pub use request::WebRequest;
pub use response::WebResponse;
pub use view::{HandlerError, HandlerResult, ModelAndView, View};
