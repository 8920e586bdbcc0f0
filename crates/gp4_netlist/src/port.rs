//! Module port definitions.

use crate::ids::PortId;
use serde::{Deserialize, Serialize};

/// The declared direction of a port on a module boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Data flows into the module.
    Input,
    /// Data flows out of the module.
    Output,
    /// Bidirectional (pad ports of `GP_IOBUF`).
    Inout,
}

/// One port in a module's external interface.
///
/// For the top module these are the design's pins; for primitive modules
/// they form the port-direction table the netlist-graph builder consults
/// when classifying cell connections as drivers or loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePort {
    /// The unique ID of this port within its module.
    pub id: PortId,
    /// The port name.
    pub name: String,
    /// The declared direction.
    pub direction: PortDirection,
}

impl ModulePort {
    /// Creates a port with a placeholder ID; the real ID is assigned by
    /// [`NetlistModule::add_port`](crate::NetlistModule::add_port).
    pub fn new(name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            id: PortId::from_raw(0),
            name: name.into(),
            direction,
        }
    }
}
