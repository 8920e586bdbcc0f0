//! Nets and their connection points.

use crate::ids::{CellId, NetId, PortId};
use serde::{Deserialize, Serialize};

/// One cell-port connection point on a net.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellPort {
    /// The connected cell.
    pub cell: CellId,
    /// The cell port name.
    pub port: String,
    /// For vector ports, the bit index this net attaches to.
    pub bit: Option<u32>,
}

impl CellPort {
    /// Renders the routing net label for this connection point: the port
    /// name, vector-indexed where applicable (e.g. `DIN[3]`).
    pub fn net_label(&self) -> String {
        match self.bit {
            Some(bit) => format!("{}[{bit}]", self.port),
            None => self.port.clone(),
        }
    }
}

/// A named electrical node.
///
/// Legality rules are enforced by the netlist-graph builder, not here: at
/// most one driver (a top-level port or a cell output), loads require a
/// driver, and a driver with no loads is legal (e.g. when the signal was
/// absorbed into hard IP).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// The unique ID of this net within its module.
    pub id: NetId,
    /// The net name from synthesis.
    pub name: String,
    /// Top-level ports attached directly to this net.
    pub ports: Vec<PortId>,
    /// Cell-port connection points, in synthesis order.
    pub nodeports: Vec<CellPort>,
}

impl Net {
    /// Creates a net with a placeholder ID; the real ID is assigned by
    /// [`NetlistModule::add_net`](crate::NetlistModule::add_net).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NetId::from_raw(0),
            name: name.into(),
            ports: Vec::new(),
            nodeports: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_net_label() {
        let cp = CellPort {
            cell: CellId::from_raw(0),
            port: "IN0".into(),
            bit: None,
        };
        assert_eq!(cp.net_label(), "IN0");
    }

    #[test]
    fn vector_net_label() {
        let cp = CellPort {
            cell: CellId::from_raw(0),
            port: "DIN".into(),
            bit: Some(3),
        };
        assert_eq!(cp.net_label(), "DIN[3]");
    }

    #[test]
    fn new_net_is_unconnected() {
        let net = Net::new("w");
        assert!(net.ports.is_empty());
        assert!(net.nodeports.is_empty());
        assert_eq!(net.name, "w");
    }
}
