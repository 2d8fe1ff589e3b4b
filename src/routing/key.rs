//! Routing table keys.
//!
//! # Responsibilities
//! - Enumerate the supported HTTP verbs
//! - Parse raw method strings from the transport
//! - Pair a path with a verb as the table key
//!
//! # Design Decisions
//! - Method parsing is exact and case-sensitive (methods are case-sensitive tokens)
//! - Paths are compared byte for byte, no pattern matching

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// HTTP verbs a route can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl RequestMethod {
    /// Every supported verb. A mapping with no explicit methods expands to this set.
    pub const ALL: [RequestMethod; 8] = [
        RequestMethod::Get,
        RequestMethod::Head,
        RequestMethod::Post,
        RequestMethod::Put,
        RequestMethod::Patch,
        RequestMethod::Delete,
        RequestMethod::Options,
        RequestMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Head => "HEAD",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Options => "OPTIONS",
            RequestMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method string is not one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for RequestMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Key of the routing table: an exact path and a verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerKey {
    path: String,
    method: RequestMethod,
}

impl HandlerKey {
    pub fn new(path: impl Into<String>, method: RequestMethod) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_known_methods() {
        for method in RequestMethod::ALL {
            assert_eq!(method.as_str().parse::<RequestMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("get".parse::<RequestMethod>().is_err());
        assert!("Post".parse::<RequestMethod>().is_err());
        assert_eq!(
            "CONNECT".parse::<RequestMethod>(),
            Err(UnknownMethod("CONNECT".into()))
        );
    }

    #[test]
    fn test_key_equality_and_hash() {
        let a = HandlerKey::new("/register", RequestMethod::Get);
        let b = HandlerKey::new(String::from("/register"), RequestMethod::Get);
        let c = HandlerKey::new("/register", RequestMethod::Post);
        let d = HandlerKey::new("/register/", RequestMethod::Get);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d); // No trailing-slash normalization

        let set: HashSet<HandlerKey> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_key_display() {
        let key = HandlerKey::new("/register", RequestMethod::Delete);
        assert_eq!(key.to_string(), "DELETE /register");
    }
}
