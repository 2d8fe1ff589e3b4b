//! Shared controllers and server setup for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use webmvc::config::AppConfig;
use webmvc::routing::{
    BoxError, ComponentCatalog, Controller, HandlerMapping, Operation, RequestMapping,
    RequestMethod,
};
use webmvc::web::{HandlerError, HandlerResult, ModelAndView, WebRequest, WebResponse};
use webmvc::HttpServer;

pub const ADMIN_KEY: &str = "test-admin-key";

/// `save` on POST /register, `show` on GET /register, plus an unmapped helper.
#[derive(Default)]
pub struct RegisterController {
    pub saved: AtomicUsize,
}

impl RegisterController {
    fn save(&self, req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        if req.parameter("account").is_none() {
            return Err(HandlerError::BadRequest("missing parameter: account".into()));
        }
        self.saved.fetch_add(1, Ordering::SeqCst);
        Ok(ModelAndView::named("redirect:/index.html"))
    }

    fn show(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Ok(ModelAndView::named("/register.html"))
    }

    fn audit(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Ok(ModelAndView::json())
    }
}

impl Controller for RegisterController {
    fn create() -> Result<Self, BoxError> {
        Ok(Self::default())
    }

    fn operations() -> Vec<Operation<Self>> {
        vec![
            Operation::new("save", Self::save)
                .mapping(RequestMapping::new("/register").method(RequestMethod::Post)),
            Operation::new("show", Self::show)
                .mapping(RequestMapping::new("/register").method(RequestMethod::Get)),
            Operation::new("audit", Self::audit),
        ]
    }
}

/// Mapped without a method list: answers every verb at `/any`.
pub struct EchoController;

impl EchoController {
    fn echo(&self, req: &WebRequest, res: &mut WebResponse) -> HandlerResult {
        res.add_header("x-echo-method", req.method());
        Ok(ModelAndView::json()
            .with_attribute("method", req.method())
            .with_attribute("name", req.parameter("name").unwrap_or("anonymous")))
    }
}

impl Controller for EchoController {
    fn create() -> Result<Self, BoxError> {
        Ok(EchoController)
    }

    fn operations() -> Vec<Operation<Self>> {
        vec![Operation::new("echo", Self::echo).mapping(RequestMapping::new("/any"))]
    }
}

/// Always fails, to exercise error mapping.
pub struct FailingController;

impl FailingController {
    fn fail(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Err(HandlerError::Internal("storage offline".into()))
    }
}

impl Controller for FailingController {
    fn create() -> Result<Self, BoxError> {
        Ok(FailingController)
    }

    fn operations() -> Vec<Operation<Self>> {
        vec![Operation::new("fail", Self::fail)
            .mapping(RequestMapping::new("/fail").method(RequestMethod::Get))]
    }
}

pub fn catalog() -> ComponentCatalog {
    let mut catalog = ComponentCatalog::new();
    catalog
        .register_controller::<RegisterController>("test::controller")
        .register_controller::<EchoController>("test::controller")
        .register_controller::<FailingController>("test::controller::errors")
        .register_component("Clock", "test::support");
    catalog
}

#[allow(dead_code)]
pub fn mapping() -> Arc<HandlerMapping> {
    Arc::new(HandlerMapping::initialize(&catalog(), &["test"]).unwrap())
}

#[allow(dead_code)]
pub fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.scan.base_locations = vec!["test".into()];
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.into();
    config
}

#[allow(dead_code)]
pub fn server() -> HttpServer {
    HttpServer::new(config(), mapping())
}
