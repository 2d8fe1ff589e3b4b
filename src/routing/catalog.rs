//! Component catalog: the discovery mechanism the scanner reads.
//!
//! # Responsibilities
//! - Record components, their location and whether they carry the controller marker
//! - Enumerate controllers under a set of base locations
//!
//! # Design Decisions
//! - Registration is explicit and happens once at startup
//! - Locations are `::` separated namespaces; a base location matches itself and
//!   everything beneath it, never a sibling sharing a prefix
//! - Each controller type is recorded once, keyed by `TypeId`

use std::any::TypeId;
use std::collections::HashSet;

use crate::routing::controller::Controller;
use crate::routing::error::ScanError;
use crate::routing::scanner::TableBuilder;

/// Marker carried by a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stereotype {
    Controller,
    Component,
}

type RegisterFn = fn(&mut TableBuilder) -> Result<(), ScanError>;

/// One catalog entry.
#[derive(Clone)]
pub struct ComponentDescriptor {
    name: &'static str,
    location: String,
    stereotype: Stereotype,
    register: Option<RegisterFn>,
}

impl ComponentDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn stereotype(&self) -> Stereotype {
        self.stereotype
    }

    pub(crate) fn register(&self, builder: &mut TableBuilder) -> Result<(), ScanError> {
        match self.register {
            Some(register) => register(builder),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("stereotype", &self.stereotype)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ComponentCatalog {
    components: Vec<ComponentDescriptor>,
    controller_types: HashSet<TypeId>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record controller type `C` at `location`. Registering a type twice keeps the first entry.
    pub fn register_controller<C: Controller>(&mut self, location: impl Into<String>) -> &mut Self {
        if !self.controller_types.insert(TypeId::of::<C>()) {
            tracing::debug!(
                controller = std::any::type_name::<C>(),
                "Controller already registered"
            );
            return self;
        }

        self.components.push(ComponentDescriptor {
            name: std::any::type_name::<C>(),
            location: location.into(),
            stereotype: Stereotype::Controller,
            register: Some(TableBuilder::register_controller::<C>),
        });
        self
    }

    /// Record a component without the controller marker.
    pub fn register_component(
        &mut self,
        name: &'static str,
        location: impl Into<String>,
    ) -> &mut Self {
        self.components.push(ComponentDescriptor {
            name,
            location: location.into(),
            stereotype: Stereotype::Component,
            register: None,
        });
        self
    }

    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Controllers located under any of `base_locations`, in registration order.
    pub fn discover<'a, S: AsRef<str>>(
        &'a self,
        base_locations: &'a [S],
    ) -> impl Iterator<Item = &'a ComponentDescriptor> + 'a {
        self.components.iter().filter(move |component| {
            component.stereotype == Stereotype::Controller
                && base_locations
                    .iter()
                    .any(|base| is_within(component.location(), base.as_ref()))
        })
    }
}

fn is_within(location: &str, base: &str) -> bool {
    match location.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::controller::{BoxError, Operation};

    struct First;
    struct Second;

    impl Controller for First {
        fn create() -> Result<Self, BoxError> {
            Ok(First)
        }
        fn operations() -> Vec<Operation<Self>> {
            Vec::new()
        }
    }

    impl Controller for Second {
        fn create() -> Result<Self, BoxError> {
            Ok(Second)
        }
        fn operations() -> Vec<Operation<Self>> {
            Vec::new()
        }
    }

    #[test]
    fn test_location_matching() {
        assert!(is_within("app::controller", "app"));
        assert!(is_within("app::controller", "app::controller"));
        assert!(is_within("app::controller::admin", "app::controller"));
        assert!(!is_within("application::controller", "app"));
        assert!(!is_within("app", "app::controller"));
    }

    #[test]
    fn test_discover_filters_by_location_and_marker() {
        let mut catalog = ComponentCatalog::new();
        catalog
            .register_controller::<First>("app::controller")
            .register_controller::<Second>("admin::controller")
            .register_component("UserRepository", "app::repository");

        let found: Vec<_> = catalog.discover(&["app"]).map(|c| c.name()).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("First"));

        let all: Vec<_> = catalog.discover(&["app", "admin"]).collect();
        assert_eq!(all.len(), 2);

        assert_eq!(catalog.discover(&["other"]).count(), 0);
        assert_eq!(catalog.components().len(), 3);
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut catalog = ComponentCatalog::new();
        catalog
            .register_controller::<First>("app::controller")
            .register_controller::<First>("app::other");

        assert_eq!(catalog.components().len(), 1);
        assert_eq!(catalog.components()[0].location(), "app::controller");
    }
}
