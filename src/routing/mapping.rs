//! Request resolution against the finished routing table.
//!
//! # Responsibilities
//! - Own the routing table produced by the scanner
//! - Resolve (path, method) to exactly one `HandlerExecution`
//! - Expose the table for introspection (admin, logs)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact lookup via HashMap, no pattern matching
//! - Unknown verbs are a lookup miss, reported like any other not-found

use std::collections::HashMap;

use serde::Serialize;

use crate::routing::catalog::ComponentCatalog;
use crate::routing::error::{ResolveError, ScanError};
use crate::routing::execution::HandlerExecution;
use crate::routing::key::{HandlerKey, RequestMethod};
use crate::routing::scanner::{ControllerScanner, HandlerTable};
use crate::web::WebRequest;

/// One row of the routing table, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: RequestMethod,
    pub path: String,
    pub controller: String,
    pub operation: String,
}

#[derive(Debug)]
pub struct HandlerMapping {
    handlers: HashMap<HandlerKey, HandlerExecution>,
}

impl HandlerMapping {
    /// Scan `catalog` under `base_locations` and freeze the result.
    pub fn initialize<S: AsRef<str>>(
        catalog: &ComponentCatalog,
        base_locations: &[S],
    ) -> Result<Self, ScanError> {
        let handlers = ControllerScanner::new(catalog).scan(base_locations)?;
        Ok(Self::from_table(handlers))
    }

    pub fn from_table(handlers: HandlerTable) -> Self {
        Self { handlers }
    }

    /// Find the handler for a normalized request.
    pub fn resolve(&self, request: &WebRequest) -> Result<&HandlerExecution, ResolveError> {
        self.get_handler(request.method(), request.path())
    }

    /// Find the handler for a raw method string and an exact path.
    pub fn get_handler(&self, method: &str, path: &str) -> Result<&HandlerExecution, ResolveError> {
        let not_found = || ResolveError::HandlerNotFound {
            method: method.to_string(),
            path: path.to_string(),
        };

        let method: RequestMethod = method.parse().map_err(|_| not_found())?;
        self.handlers
            .get(&HandlerKey::new(path, method))
            .ok_or_else(not_found)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// All registered routes, sorted by path then method.
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut keys: Vec<&HandlerKey> = self.handlers.keys().collect();
        keys.sort_by(|a, b| (a.path(), a.method()).cmp(&(b.path(), b.method())));

        keys.into_iter()
            .map(|key| {
                let execution = &self.handlers[key];
                RouteInfo {
                    method: key.method(),
                    path: key.path().to_string(),
                    controller: execution.controller().to_string(),
                    operation: execution.operation().to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::controller::{BoxError, Controller, Operation, RequestMapping};
    use crate::web::{HandlerResult, ModelAndView, View, WebResponse};

    #[derive(Default)]
    struct RegisterController;

    impl RegisterController {
        fn save(&self, _: &WebRequest, _: &mut WebResponse) -> HandlerResult {
            Ok(ModelAndView::named("redirect:/index.html"))
        }

        fn show(&self, _: &WebRequest, _: &mut WebResponse) -> HandlerResult {
            Ok(ModelAndView::named("/register.html"))
        }
    }

    impl Controller for RegisterController {
        fn create() -> Result<Self, BoxError> {
            Ok(Self)
        }

        fn operations() -> Vec<Operation<Self>> {
            vec![
                Operation::new("save", Self::save)
                    .mapping(RequestMapping::new("/register").method(RequestMethod::Post)),
                Operation::new("show", Self::show)
                    .mapping(RequestMapping::new("/register").method(RequestMethod::Get)),
            ]
        }
    }

    fn mapping() -> HandlerMapping {
        let mut catalog = ComponentCatalog::new();
        catalog.register_controller::<RegisterController>("app::controller");
        HandlerMapping::initialize(&catalog, &["app"]).unwrap()
    }

    #[test]
    fn test_resolve_by_method() {
        let mapping = mapping();

        let post = mapping.resolve(&WebRequest::new("POST", "/register")).unwrap();
        assert_eq!(post.operation(), "save");
        let get = mapping.resolve(&WebRequest::new("GET", "/register")).unwrap();
        assert_eq!(get.operation(), "show");

        let view = get
            .handle(&WebRequest::new("GET", "/register"), &mut WebResponse::new())
            .unwrap();
        assert_eq!(view.view(), &View::Template("/register.html".into()));
    }

    #[test]
    fn test_not_found() {
        let mapping = mapping();

        assert_eq!(
            mapping.resolve(&WebRequest::new("DELETE", "/register")).unwrap_err(),
            ResolveError::HandlerNotFound {
                method: "DELETE".into(),
                path: "/register".into(),
            }
        );
        assert!(mapping.get_handler("GET", "/unregistered").is_err());
        assert!(mapping.get_handler("GET", "/register/").is_err());
    }

    #[test]
    fn test_unknown_method_is_not_found() {
        let mapping = mapping();
        let err = mapping.get_handler("BREW", "/register").unwrap_err();
        assert!(matches!(err, ResolveError::HandlerNotFound { ref method, .. } if method == "BREW"));
        assert!(mapping.get_handler("get", "/register").is_err());
    }

    #[test]
    fn test_resolve_is_stable() {
        let mapping = mapping();
        let req = WebRequest::new("GET", "/register");
        let first = mapping.resolve(&req).unwrap();
        let second = mapping.resolve(&req).unwrap();
        assert!(first.same_target(second));
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_routes_are_sorted() {
        let routes = mapping().routes();
        let rows: Vec<_> = routes
            .iter()
            .map(|r| (r.method, r.path.as_str(), r.operation.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (RequestMethod::Get, "/register", "show"),
                (RequestMethod::Post, "/register", "save"),
            ]
        );
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = HandlerMapping::from_table(HandlerTable::new());
        assert!(mapping.is_empty());
        assert!(mapping.get_handler("GET", "/").is_err());
    }
}
