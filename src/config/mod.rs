//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → read once at startup by lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload since the routing table is frozen
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::{AdminConfig, LogFormat, ObservabilityConfig, ScanConfig, ServerConfig, ViewConfig};
pub use validation::{validate_config, ValidationError};
