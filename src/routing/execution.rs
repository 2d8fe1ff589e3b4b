//! Bound invocation units.
//!
//! # Responsibilities
//! - Pair one shared controller instance with one of its operations
//! - Invoke the operation with the request and response objects
//!
//! # Design Decisions
//! - The operation is captured as a closure over the instance at scan time
//! - Cloning is cheap (two `Arc`s) and keeps the same instance identity
//! - Invocation results are returned to the caller, never retained

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::routing::controller::{Controller, HandlerFn};
use crate::web::{HandlerResult, WebRequest, WebResponse};

type Invoker = dyn Fn(&WebRequest, &mut WebResponse) -> HandlerResult + Send + Sync;

#[derive(Clone)]
pub struct HandlerExecution {
    controller: &'static str,
    operation: &'static str,
    instance: Arc<dyn Any + Send + Sync>,
    invoker: Arc<Invoker>,
}

impl HandlerExecution {
    /// Bind `handler` to `instance`.
    pub fn new<C: Controller>(
        instance: Arc<C>,
        operation: &'static str,
        handler: HandlerFn<C>,
    ) -> Self {
        let bound = Arc::clone(&instance);
        let invoker: Arc<Invoker> = Arc::new(move |req: &WebRequest, res: &mut WebResponse| {
            handler(bound.as_ref(), req, res)
        });

        Self {
            controller: std::any::type_name::<C>(),
            operation,
            instance,
            invoker,
        }
    }

    /// Run the bound operation.
    pub fn handle(&self, request: &WebRequest, response: &mut WebResponse) -> HandlerResult {
        (self.invoker)(request, response)
    }

    /// Type name of the controller that owns the operation.
    pub fn controller(&self) -> &'static str {
        self.controller
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// The controller instance, if it is a `C`.
    pub fn instance<C: Controller>(&self) -> Option<&C> {
        self.instance.downcast_ref::<C>()
    }

    /// True when both executions are bound to the same instance and operation.
    pub fn same_target(&self, other: &HandlerExecution) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.instance), Arc::as_ptr(&other.instance))
            && self.operation == other.operation
    }
}

impl fmt::Debug for HandlerExecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerExecution")
            .field("controller", &self.controller)
            .field("operation", &self.operation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::controller::{BoxError, Operation};
    use crate::web::{HandlerError, ModelAndView};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingController {
        calls: AtomicUsize,
    }

    impl CountingController {
        fn count(&self, req: &WebRequest, res: &mut WebResponse) -> HandlerResult {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            res.add_header("x-count", n.to_string());
            match req.parameter("fail") {
                Some(_) => Err(HandlerError::Internal("asked to fail".into())),
                None => Ok(ModelAndView::json().with_attribute("calls", n)),
            }
        }
    }

    impl Controller for CountingController {
        fn create() -> Result<Self, BoxError> {
            Ok(Self::default())
        }

        fn operations() -> Vec<Operation<Self>> {
            vec![Operation::new("count", Self::count)]
        }
    }

    #[test]
    fn test_handle_invokes_bound_instance() {
        let instance = Arc::new(CountingController::default());
        let execution = HandlerExecution::new(instance.clone(), "count", CountingController::count);

        let req = WebRequest::new("GET", "/count");
        let mut res = WebResponse::new();
        execution.handle(&req, &mut res).unwrap();
        let mav = execution.handle(&req, &mut res).unwrap();

        assert_eq!(mav.attribute("calls"), Some(&serde_json::Value::from(2)));
        assert_eq!(instance.calls.load(Ordering::SeqCst), 2);
        assert_eq!(res.headers().len(), 2);
    }

    #[test]
    fn test_handler_error_is_returned() {
        let execution = HandlerExecution::new(
            Arc::new(CountingController::default()),
            "count",
            CountingController::count,
        );
        let req = WebRequest::new("GET", "/count").with_parameter("fail", "1");
        let result = execution.handle(&req, &mut WebResponse::new());
        assert_eq!(result, Err(HandlerError::Internal("asked to fail".into())));
    }

    #[test]
    fn test_identity() {
        let instance = Arc::new(CountingController::default());
        let a = HandlerExecution::new(instance.clone(), "count", CountingController::count);
        let b = a.clone();
        let c = HandlerExecution::new(
            Arc::new(CountingController::default()),
            "count",
            CountingController::count,
        );

        assert!(a.same_target(&b));
        assert!(!a.same_target(&c));
        assert!(std::ptr::eq(
            a.instance::<CountingController>().unwrap(),
            instance.as_ref()
        ));
        assert!(a.controller().ends_with("CountingController"));
    }
}
