//! View results returned by controller operations.
//!
//! # Design Decisions
//! - `redirect:` prefixed view names become redirects, everything else is a template
//! - Model attributes are JSON values so every renderer can consume them

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

const REDIRECT_PREFIX: &str = "redirect:";

/// What the transport should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Render the named template.
    Template(String),
    /// Send the client to another location.
    Redirect(String),
    /// Serialize the model as the response body.
    Json,
}

impl View {
    /// Build a view from a view name, honoring the `redirect:` prefix.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(REDIRECT_PREFIX) {
            Some(location) => View::Redirect(location.to_string()),
            None => View::Template(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelAndView {
    view: View,
    model: BTreeMap<String, Value>,
}

impl ModelAndView {
    pub fn new(view: View) -> Self {
        Self {
            view,
            model: BTreeMap::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(View::named(name))
    }

    pub fn json() -> Self {
        Self::new(View::Json)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.model.insert(name.into(), value.into());
        self
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn model(&self) -> &BTreeMap<String, Value> {
        &self.model
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.model.get(name)
    }
}

/// Failure raised by a controller operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The request was malformed (missing or invalid parameters).
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("handler failed: {0}")]
    Internal(String),
}

pub type HandlerResult = Result<ModelAndView, HandlerError>;
