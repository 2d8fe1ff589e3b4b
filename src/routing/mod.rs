//! Handler discovery and dispatch.
//!
//! # Data Flow
//! ```text
//! Startup (once):
//!     ComponentCatalog + base locations
//!     → catalog.rs (discover controllers under the base locations)
//!     → scanner.rs (instantiate each controller, expand mappings, detect conflicts)
//!     → mapping.rs (freeze as immutable HandlerMapping)
//!
//! Incoming Request (method, path):
//!     → key.rs (parse verb, build HandlerKey)
//!     → mapping.rs (exact lookup)
//!     → Return: HandlerExecution or HandlerNotFound
//!     → execution.rs (transport invokes the bound operation)
//! ```
//!
//! # Design Decisions
//! - Routes registered explicitly at startup, immutable at runtime
//! - Exact (path, method) keys, no wildcards
//! - A mapping without methods answers every supported verb
//! - Duplicate keys reject the whole table; nothing is silently shadowed

pub mod catalog;
pub mod controller;
pub mod error;
pub mod execution;
pub mod key;
pub mod mapping;
pub mod scanner;

pub use catalog::{ComponentCatalog, ComponentDescriptor, Stereotype};
pub use controller::{BoxError, Controller, HandlerFn, Operation, RequestMapping};
pub use error::{MappingConflict, ResolveError, ScanError};
pub use execution::HandlerExecution;
pub use key::{HandlerKey, RequestMethod, UnknownMethod};
pub use mapping::{HandlerMapping, RouteInfo};
pub use scanner::{ControllerScanner, HandlerTable};
