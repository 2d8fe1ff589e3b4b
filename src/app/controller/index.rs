use crate::routing::{BoxError, Controller, Operation, RequestMapping};
use crate::web::{HandlerResult, ModelAndView, WebRequest, WebResponse};

/// Serves the landing page for every verb.
pub struct IndexController;

impl IndexController {
    fn index(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Ok(ModelAndView::named("/index.html"))
    }
}

impl Controller for IndexController {
    fn create() -> Result<Self, BoxError> {
        Ok(IndexController)
    }

    fn operations() -> Vec<Operation<Self>> {
        vec![Operation::new("index", Self::index).mapping(RequestMapping::new("/"))]
    }
}
