//! Controller scanning: catalog + base locations → routing table.
//!
//! # Responsibilities
//! - Instantiate each discovered controller exactly once
//! - Register every routable operation under its (expanded) methods
//! - Skip helper operations that carry no route declaration
//! - Collect key conflicts and reject the whole table if any exist
//!
//! # Design Decisions
//! - The table is built in a local `TableBuilder` and only handed out when complete
//! - Instantiation and malformed declarations fail fast; conflicts are collected so
//!   all of them are reported at once
//! - Conflicts are sorted by key and name their operations in ascending order, so the
//!   report does not depend on registration order

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::routing::catalog::ComponentCatalog;
use crate::routing::controller::{Controller, Operation, RequestMapping};
use crate::routing::error::{MappingConflict, ScanError};
use crate::routing::execution::HandlerExecution;
use crate::routing::key::HandlerKey;

/// Finished routing table.
pub type HandlerTable = HashMap<HandlerKey, HandlerExecution>;

/// Scans a catalog for controllers under the given base locations.
pub struct ControllerScanner<'a> {
    catalog: &'a ComponentCatalog,
}

impl<'a> ControllerScanner<'a> {
    pub fn new(catalog: &'a ComponentCatalog) -> Self {
        Self { catalog }
    }

    /// Build the complete table, or fail without exposing a partial one.
    pub fn scan<S: AsRef<str>>(&self, base_locations: &[S]) -> Result<HandlerTable, ScanError> {
        tracing::info!(
            base_locations = ?base_locations.iter().map(|s| s.as_ref()).collect::<Vec<&str>>(),
            "Scanning for controllers"
        );

        let mut builder = TableBuilder::default();
        let mut controllers = 0usize;
        for component in self.catalog.discover(base_locations) {
            tracing::debug!(
                controller = component.name(),
                location = component.location(),
                "Found controller"
            );
            component.register(&mut builder)?;
            controllers += 1;
        }

        let table = builder.finish()?;
        tracing::info!(
            controllers,
            handlers = table.len(),
            "Controller scan complete"
        );
        Ok(table)
    }
}

/// Table under construction. Lives only inside a scan.
#[derive(Default)]
pub struct TableBuilder {
    handlers: HandlerTable,
    conflicts: Vec<MappingConflict>,
}

impl TableBuilder {
    /// Instantiate `C` once and register its routable operations.
    pub(crate) fn register_controller<C: Controller>(&mut self) -> Result<(), ScanError> {
        let controller = std::any::type_name::<C>();
        let instance = Arc::new(C::create().map_err(|source| ScanError::Instantiation {
            controller,
            source,
        })?);

        let operations = C::operations();
        check_operation_names(controller, &operations)?;

        for operation in &operations {
            let Some(mapping) = operation.request_mapping() else {
                tracing::trace!(controller, operation = operation.name(), "Skipping unmapped operation");
                continue;
            };
            check_mapping(controller, operation.name(), mapping)?;

            let execution =
                HandlerExecution::new(Arc::clone(&instance), operation.name(), operation.handler());
            for method in mapping.effective_methods() {
                self.insert(HandlerKey::new(mapping.path(), method), execution.clone());
            }
        }
        Ok(())
    }

    fn insert(&mut self, key: HandlerKey, execution: HandlerExecution) {
        if let Some(existing) = self.handlers.get(&key) {
            tracing::error!(
                key = %key,
                existing = %qualified(existing),
                conflicting = %qualified(&execution),
                "Conflicting handler mapping"
            );
            self.conflicts.push(MappingConflict::new(
                key,
                qualified(existing),
                qualified(&execution),
            ));
            return;
        }

        tracing::debug!(
            key = %key,
            handler = %qualified(&execution),
            "Registered handler"
        );
        self.handlers.insert(key, execution);
    }

    fn finish(mut self) -> Result<HandlerTable, ScanError> {
        if self.conflicts.is_empty() {
            return Ok(self.handlers);
        }
        self.conflicts.sort_by(|a, b| {
            (&a.key, &a.first, &a.second).cmp(&(&b.key, &b.first, &b.second))
        });
        Err(ScanError::ConflictingMappings(self.conflicts))
    }
}

fn qualified(execution: &HandlerExecution) -> String {
    format!("{}::{}", execution.controller(), execution.operation())
}

fn check_operation_names<C>(
    controller: &'static str,
    operations: &[Operation<C>],
) -> Result<(), ScanError> {
    let mut seen = HashSet::new();
    for operation in operations {
        if !seen.insert(operation.name()) {
            return Err(ScanError::InvalidMapping {
                controller,
                operation: operation.name(),
                reason: "operation declared more than once".to_string(),
            });
        }
    }
    Ok(())
}

fn check_mapping(
    controller: &'static str,
    operation: &'static str,
    mapping: &RequestMapping,
) -> Result<(), ScanError> {
    if !mapping.path().starts_with('/') {
        return Err(ScanError::InvalidMapping {
            controller,
            operation,
            reason: format!("path {:?} must start with '/'", mapping.path()),
        });
    }
    Ok(())
}
