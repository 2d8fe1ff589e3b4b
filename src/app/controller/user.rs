use crate::app::repository::{self, InMemoryUserRepository};
use crate::routing::{BoxError, Controller, Operation, RequestMapping, RequestMethod};
use crate::web::{HandlerError, HandlerResult, ModelAndView, WebRequest, WebResponse};

/// JSON lookup of registered users.
pub struct UserController {
    users: &'static InMemoryUserRepository,
}

impl UserController {
    fn show(&self, req: &WebRequest, res: &mut WebResponse) -> HandlerResult {
        let account = req
            .parameter("account")
            .ok_or_else(|| HandlerError::BadRequest("missing parameter: account".to_string()))?;

        match self.users.find_by_account(account) {
            Some(user) => {
                let user = serde_json::to_value(&user)
                    .map_err(|e| HandlerError::Internal(e.to_string()))?;
                Ok(ModelAndView::json().with_attribute("user", user))
            }
            None => {
                res.set_status(404);
                Ok(ModelAndView::json().with_attribute("error", "user not found"))
            }
        }
    }

    fn count(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Ok(ModelAndView::json().with_attribute("count", self.users.count()))
    }
}

impl Controller for UserController {
    fn create() -> Result<Self, BoxError> {
        Ok(Self {
            users: repository::users(),
        })
    }

    fn operations() -> Vec<Operation<Self>> {
        vec![
            Operation::new("show", Self::show)
                .mapping(RequestMapping::new("/api/user").method(RequestMethod::Get)),
            Operation::new("count", Self::count).mapping(
                RequestMapping::new("/api/user/count")
                    .methods([RequestMethod::Get, RequestMethod::Head]),
            ),
        ]
    }
}
