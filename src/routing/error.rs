//! Error types for scanning and resolution.
//!
//! Build-time errors (`ScanError`) abort initialization. The request-time
//! error (`ResolveError`) is a routine, recoverable lookup miss.

use std::fmt;

use thiserror::Error;

use crate::routing::controller::BoxError;
use crate::routing::key::HandlerKey;

/// Fatal errors raised while building the routing table.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A controller factory did not yield an instance.
    #[error("failed to instantiate controller {controller}: {source}")]
    Instantiation {
        controller: &'static str,
        #[source]
        source: BoxError,
    },
    /// An operation's declaration cannot be registered.
    #[error("invalid mapping on {controller}::{operation}: {reason}")]
    InvalidMapping {
        controller: &'static str,
        operation: &'static str,
        reason: String,
    },
    /// Distinct operations claimed the same (path, method) keys.
    #[error("conflicting handler mappings: {}", format_conflicts(.0))]
    ConflictingMappings(Vec<MappingConflict>),
}

/// Two operations registered under one key.
///
/// The two `Controller::operation` names are stored in ascending order, so a
/// conflict reads the same whichever operation was registered first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConflict {
    pub key: HandlerKey,
    pub first: String,
    pub second: String,
}

impl MappingConflict {
    pub fn new(key: HandlerKey, a: String, b: String) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self { key, first, second }
    }
}

impl fmt::Display for MappingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is mapped by both {} and {}",
            self.key, self.first, self.second
        )
    }
}

fn format_conflicts(conflicts: &[MappingConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// No handler matches the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no handler for {method} {path}")]
    HandlerNotFound { method: String, path: String },
}
