mod index;
mod register;
mod user;

pub use index::IndexController;
pub use register::RegisterController;
pub use user::UserController;
