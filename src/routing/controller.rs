//! Controller capability and route declarations.
//!
//! # Responsibilities
//! - Define what a controller type must supply to be scanned
//! - Describe operations and their optional route declaration
//!
//! # Design Decisions
//! - Declarations are plain values built at startup, no reflection
//! - An operation without a `RequestMapping` is an ordinary helper and never routed
//! - Every operation shares one signature: request in, response out, view result back

use crate::routing::key::RequestMethod;
use crate::web::{HandlerResult, WebRequest, WebResponse};

/// Error type returned by controller factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Signature every controller operation is bound with.
pub type HandlerFn<C> = fn(&C, &WebRequest, &mut WebResponse) -> HandlerResult;

/// A type whose instance serves requests.
///
/// The scanner calls [`Controller::create`] exactly once per type and binds
/// every routable operation to that single instance.
pub trait Controller: Send + Sync + Sized + 'static {
    /// Zero-argument factory.
    fn create() -> Result<Self, BoxError>;

    /// Operations declared on this type, routable or not.
    fn operations() -> Vec<Operation<Self>>;
}

/// Route declaration attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMapping {
    path: String,
    methods: Vec<RequestMethod>,
}

impl RequestMapping {
    /// A mapping on `path` with no method filter (responds to every verb).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: RequestMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = RequestMethod>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn declared_methods(&self) -> &[RequestMethod] {
        &self.methods
    }

    /// Methods this mapping registers under, in a stable order, without repeats.
    /// An empty declaration expands to every supported verb.
    pub fn effective_methods(&self) -> Vec<RequestMethod> {
        if self.methods.is_empty() {
            return RequestMethod::ALL.to_vec();
        }
        let mut methods = self.methods.clone();
        methods.sort();
        methods.dedup();
        methods
    }
}

/// One operation declared on controller `C`.
pub struct Operation<C> {
    name: &'static str,
    handler: HandlerFn<C>,
    mapping: Option<RequestMapping>,
}

impl<C> Operation<C> {
    pub fn new(name: &'static str, handler: HandlerFn<C>) -> Self {
        Self {
            name,
            handler,
            mapping: None,
        }
    }

    /// Make this operation routable.
    pub fn mapping(mut self, mapping: RequestMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handler(&self) -> HandlerFn<C> {
        self.handler
    }

    pub fn request_mapping(&self) -> Option<&RequestMapping> {
        self.mapping.as_ref()
    }
}

impl<C> std::fmt::Debug for Operation<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("mapping", &self.mapping)
            .finish()
    }
}
