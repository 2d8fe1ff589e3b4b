use crate::app::repository::{self, InMemoryUserRepository};
use crate::routing::{BoxError, Controller, Operation, RequestMapping, RequestMethod};
use crate::web::{HandlerError, HandlerResult, ModelAndView, WebRequest, WebResponse};

/// Sign-up form: `GET /register` shows it, `POST /register` submits it.
pub struct RegisterController {
    users: &'static InMemoryUserRepository,
}

impl RegisterController {
    fn save(&self, req: &WebRequest, res: &mut WebResponse) -> HandlerResult {
        let account = required(req, "account")?;
        let password = required(req, "password")?;
        let email = required(req, "email")?;

        match self.users.save(account, password, email) {
            Some(user) => {
                tracing::info!(account = %user.account, id = user.id, "User registered");
                Ok(ModelAndView::named("redirect:/index.html"))
            }
            None => {
                res.set_status(409);
                Ok(ModelAndView::named("/register.html")
                    .with_attribute("error", format!("account {} already exists", account)))
            }
        }
    }

    fn show(&self, _req: &WebRequest, _res: &mut WebResponse) -> HandlerResult {
        Ok(ModelAndView::named("/register.html"))
    }
}

fn required<'a>(req: &'a WebRequest, name: &str) -> Result<&'a str, HandlerError> {
    req.parameter(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HandlerError::BadRequest(format!("missing parameter: {}", name)))
}

impl Controller for RegisterController {
    fn create() -> Result<Self, BoxError> {
        Ok(Self {
            users: repository::users(),
        })
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
