//! The netlist root: a module table plus the designated top module.

use crate::ids::ModuleId;
use crate::module::NetlistModule;
use crate::primitives::primitive_modules;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed, synthesized netlist.
///
/// Holds the top module being placed and routed plus the primitive library
/// modules whose port-direction tables drive the net legality checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Netlist {
    modules: Vec<NetlistModule>,
    top: Option<ModuleId>,
    /// Auxiliary index: module name to ID (rebuilt on deserialization).
    #[serde(skip)]
    module_by_name: HashMap<String, ModuleId>,
}

impl Netlist {
    /// Creates an empty netlist with no primitive library.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            top: None,
            module_by_name: HashMap::new(),
        }
    }

    /// Creates a netlist pre-seeded with the GreenPAK4 primitive library.
    pub fn with_primitives() -> Self {
        let mut netlist = Self::new();
        for module in primitive_modules() {
            netlist.add_module(module);
        }
        netlist
    }

    /// Adds a module and returns its ID.
    pub fn add_module(&mut self, module: NetlistModule) -> ModuleId {
        let id = ModuleId::from_raw(self.modules.len() as u32);
        self.module_by_name.insert(module.name.clone(), id);
        self.modules.push(module);
        id
    }

    /// Marks the module being placed and routed.
    pub fn set_top(&mut self, id: ModuleId) {
        self.top = Some(id);
    }

    /// Returns the ID of the top module, if one was set.
    pub fn top(&self) -> Option<ModuleId> {
        self.top
    }

    /// Returns the top module.
    pub fn top_module(&self) -> Option<&NetlistModule> {
        self.top.map(|id| self.module(id))
    }

    /// Returns a mutable reference to the top module.
    pub fn top_module_mut(&mut self) -> Option<&mut NetlistModule> {
        let id = self.top?;
        Some(self.module_mut(id))
    }

    /// Returns the module with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn module(&self, id: ModuleId) -> &NetlistModule {
        &self.modules[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the module with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut NetlistModule {
        &mut self.modules[id.as_raw() as usize]
    }

    /// Looks up a module by name, e.g. a primitive type name.
    pub fn module_by_name(&self, name: &str) -> Option<&NetlistModule> {
        self.module_by_name.get(name).map(|&id| self.module(id))
    }

    /// Returns the number of modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Rebuilds auxiliary indices (own and per-module) after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.module_by_name.clear();
        for (i, module) in self.modules.iter_mut().enumerate() {
            module.rebuild_indices();
            self.module_by_name
                .insert(module.name.clone(), ModuleId::from_raw(i as u32));
        }
    }
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}
