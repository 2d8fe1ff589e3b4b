//! Scan-then-resolve behavior through the public API.

use webmvc::routing::{
    BoxError, ComponentCatalog, Controller, HandlerMapping, Operation, RequestMapping,
    RequestMethod, ResolveError, ScanError,
};
use webmvc::web::{HandlerResult, ModelAndView, View, WebRequest, WebResponse};

mod common;

use common::{EchoController, RegisterController};

#[test]
fn test_register_scenario() {
    let mapping = common::mapping();

    let save = mapping.resolve(&WebRequest::new("POST", "/register")).unwrap();
    assert_eq!(save.operation(), "save");

    let show = mapping.resolve(&WebRequest::new("GET", "/register")).unwrap();
    assert_eq!(show.operation(), "show");

    assert!(matches!(
        mapping.resolve(&WebRequest::new("DELETE", "/register")),
        Err(ResolveError::HandlerNotFound { .. })
    ));
}

#[test]
fn test_unmapped_method_wildcard() {
    let mapping = common::mapping();

    let get = mapping.get_handler("GET", "/any").unwrap();
    for method in ["POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "TRACE"] {
        let execution = mapping.get_handler(method, "/any").unwrap();
        assert!(execution.same_target(get), "{} resolved elsewhere", method);
    }
}

#[test]
fn test_helper_operations_are_never_routed() {
    let mapping = common::mapping();
    assert!(mapping.routes().iter().all(|r| r.operation != "audit"));
}

#[test]
fn test_resolve_returns_identical_target() {
    let mapping = common::mapping();
    let req = WebRequest::new("POST", "/register");

    let first = mapping.resolve(&req).unwrap();
    let second = mapping.resolve(&req).unwrap();
    assert!(first.same_target(second));

    // Both invocations hit the one scanned instance
    first.handle(&req.clone().with_parameter("account", "a"), &mut WebResponse::new()).unwrap();
    second.handle(&req.with_parameter("account", "b"), &mut WebResponse::new()).unwrap();
    let instance = first.instance::<RegisterController>().unwrap();
    assert_eq!(instance.saved.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_unregistered_path_is_not_found() {
    let mapping = common::mapping();
    let err = mapping.get_handler("GET", "/unregistered").unwrap_err();
    assert_eq!(
        err,
        ResolveError::HandlerNotFound {
            method: "GET".into(),
            path: "/unregistered".into(),
        }
    );

    let empty = HandlerMapping::initialize(&ComponentCatalog::new(), &["test"]).unwrap();
    assert!(empty.get_handler("GET", "/unregistered").is_err());
}

#[test]
fn test_base_locations_limit_the_scan() {
    let mapping = HandlerMapping::initialize(&common::catalog(), &["test::controller::errors"]).unwrap();
    assert_eq!(mapping.len(), 1);
    assert!(mapping.get_handler("GET", "/fail").is_ok());
    assert!(mapping.get_handler("GET", "/register").is_err());
}

#[test]
fn test_invocation_returns_view() {
    let mapping = common::mapping();
    let show = mapping.get_handler("GET", "/register").unwrap();
    let mav = show
        .handle(&WebRequest::new("GET", "/register"), &mut WebResponse::new())
        .unwrap();
    assert_eq!(mav.view(), &View::Template("/register.html".into()));
}

/// Claims GET /any, which `EchoController` already answers.
struct GreedyController;

impl GreedyController {
    fn grab(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Ok(ModelAndView::json())
    }
}

impl Controller for GreedyController {
    fn create() -> Result<Self, BoxError> {
        Ok(GreedyController)
    }

    fn operations() -> Vec<Operation<Self>> {
        vec![Operation::new("grab", Self::grab).mapping(
            RequestMapping::new("/any").methods([RequestMethod::Get, RequestMethod::Put]),
        )]
    }
}

#[test]
fn test_conflicts_fail_the_build() {
    let mut catalog = ComponentCatalog::new();
    catalog
        .register_controller::<EchoController>("test::controller")
        .register_controller::<GreedyController>("test::controller");

    let conflicts = match HandlerMapping::initialize(&catalog, &["test"]) {
        Err(ScanError::ConflictingMappings(conflicts)) => conflicts,
        other => panic!("expected a conflict, got {:?}", other.map(|m| m.len())),
    };
    let keys: Vec<_> = conflicts.iter().map(|c| c.key.to_string()).collect();
    assert_eq!(keys, vec!["GET /any", "PUT /any"]);
}

#[test]
fn test_conflict_report_independent_of_order() {
    let mut forward = ComponentCatalog::new();
    forward
        .register_controller::<EchoController>("test::controller")
        .register_controller::<GreedyController>("test::controller");
    let mut reverse = ComponentCatalog::new();
    reverse
        .register_controller::<GreedyController>("test::controller")
        .register_controller::<EchoController>("test::controller");

    let report = |catalog: &ComponentCatalog| match HandlerMapping::initialize(catalog, &["test"]) {
        Err(err @ ScanError::ConflictingMappings(_)) => err.to_string(),
        other => panic!("expected a conflict, got {:?}", other.map(|m| m.len())),
    };
    let forward = report(&forward);
    assert_eq!(forward, report(&reverse));
    assert!(forward.contains("GET /any is mapped by both"));
}
