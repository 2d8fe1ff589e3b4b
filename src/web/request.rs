//! Normalized incoming request.
//!
//! # Responsibilities
//! - Carry the raw method string and the already-decoded path
//! - Expose query and form parameters to controllers
//! - Expose headers by case-insensitive name
//!
//! # Design Decisions
//! - The method stays a raw string: unknown verbs are a lookup miss, not a parse error here
//! - First value wins for repeated parameters

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct WebRequest {
    method: String,
    path: String,
    parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
}

impl WebRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a parameter. Existing values are kept.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_parameter(name, value);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .entry(name.into().to_ascii_lowercase())
            .or_insert_with(|| value.into());
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_parameter_value_wins() {
        let req = WebRequest::new("POST", "/register")
            .with_parameter("account", "gugu")
            .with_parameter("account", "other");
        assert_eq!(req.parameter("account"), Some("gugu"));
        assert_eq!(req.parameter("missing"), None);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let req = WebRequest::new("GET", "/").with_header("Content-Type", "text/html");
        assert_eq!(req.header("content-type"), Some("text/html"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/html"));
    }
}
