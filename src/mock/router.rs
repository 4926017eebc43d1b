//! An in-memory module registry with port bindings.

use alloc::collections::BTreeMap;

use crate::core::host::identifier::PortId;
use crate::core::port::error::PortError;
use crate::core::routing::module::{Module, ModuleId};
use crate::core::routing::router::Router;
use crate::prelude::*;

#[derive(Debug, Default)]
pub struct MockRouter {
    routes: BTreeMap<ModuleId, Box<dyn Module>>,
    port_bindings: BTreeMap<PortId, ModuleId>,
}

impl MockRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under its id.
    pub fn add_route(&mut self, module_id: ModuleId, module: impl Module + 'static) {
        self.routes.insert(module_id, Box::new(module));
    }

    /// Binds a port to a registered module, making that module the port's
    /// owner: all channel and packet messages for the port route to it.
    pub fn bind_port(&mut self, port_id: PortId, module_id: ModuleId) -> Result<(), PortError> {
        if self.port_bindings.contains_key(&port_id) {
            return Err(PortError::PortAlreadyBound { port_id });
        }
        self.port_bindings.insert(port_id, module_id);
        Ok(())
    }
}

impl Router for MockRouter {
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module> {
        self.routes.get(module_id).map(AsRef::as_ref)
    }

    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module> {
        // NOTE: `self.routes.get_mut(module_id).map(AsMut::as_mut)` fails to
        // type-check due to a borrow-checker limitation with trait-object
        // lifetimes; expanding it out manually works around it.
        match self.routes.get_mut(module_id) {
            Some(boxed) => Some(boxed.as_mut()),
            None => None,
        }
    }

    fn lookup_module_by_port(&self, port_id: &PortId) -> Option<ModuleId> {
        self.port_bindings.get(port_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;
    use crate::applications::transfer::module::TransferModule;
    use crate::mock::bank::MockBank;

    #[test]
    fn binding_a_port_twice_fails() {
        let mut router = MockRouter::new();
        let module_id = ModuleId::new("tokentransfer");
        router.add_route(module_id.clone(), TransferModule::new(MockBank::default()));

        let port_id = PortId::from_str("tokentransfer").expect("valid identifier");
        router
            .bind_port(port_id.clone(), module_id.clone())
            .expect("fresh binding");
        assert!(matches!(
            router.bind_port(port_id, module_id),
            Err(PortError::PortAlreadyBound { .. })
        ));
    }

    #[test]
    fn unbound_port_has_no_module() {
        let router = MockRouter::new();
        let port_id = PortId::from_str("unboundport").expect("valid identifier");
        assert!(router.lookup_module_by_port(&port_id).is_none());
    }
}
