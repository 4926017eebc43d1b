//! Defines the `Router`, which binds modules to ports.

use crate::core::routing::module::{Module, ModuleId};
use crate::core::host::identifier::PortId;

/// The capability registry: binding a port routes it to its owning module,
/// and only that module ever sees callbacks for channels on the port.
pub trait Router {
    /// Returns a reference to a `Module` registered against the given `ModuleId`
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module>;

    /// Returns a mutable reference to a `Module` registered against the given `ModuleId`
    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module>;

    /// Return the module_id associated with a given port_id
    fn lookup_module_by_port(&self, port_id: &PortId) -> Option<ModuleId>;
}
