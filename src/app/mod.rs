//! Demo application served by the `webmvc` binary.
//!
//! Controllers live under `app::controller`; `catalog()` registers them along
//! with the plain components the scanner must skip.

pub mod controller;
pub mod repository;

use crate::routing::ComponentCatalog;

use self::controller::{IndexController, RegisterController, UserController};

/// Every component of the demo application.
pub fn catalog() -> ComponentCatalog {
    let mut catalog = ComponentCatalog::new();
    catalog
        .register_controller::<IndexController>("app::controller")
        .register_controller::<RegisterController>("app::controller")
        .register_controller::<UserController>("app::controller")
        .register_component("InMemoryUserRepository", "app::repository");
    catalog
}
