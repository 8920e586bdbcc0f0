//! Primitive cell instances.
//!
//! A [`Cell`] is one primitive instance in a synthesized module: a stable
//! instance name, a primitive type name, ordered port connections, and a
//! key/value attribute map (notably `LOC` for pre-placement constraints).

use crate::ids::{CellId, NetId};
use gp4_graph::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The nets attached to one named port of a cell, in bit order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// The cell port name.
    pub port: String,
    /// The connected nets; more than one entry means a vector port.
    pub nets: Vec<NetId>,
}

/// A primitive instance in a synthesized module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// The unique ID of this cell within its module.
    pub id: CellId,
    /// Stable instance name from synthesis.
    pub name: String,
    /// Primitive type name, e.g. `"GP_DFF"`.
    pub cell_type: String,
    /// Port connections in declaration order.
    pub connections: Vec<Connection>,
    /// Synthesis attributes, e.g. `LOC`.
    pub attributes: BTreeMap<String, String>,
    /// Back-reference to this cell's netlist-graph node, written once by the
    /// graph builder.
    pub par_node: Option<NodeId>,
}

impl Cell {
    /// Creates a cell with a placeholder ID; the real ID is assigned by
    /// [`NetlistModule::add_cell`](crate::NetlistModule::add_cell).
    pub fn new(name: impl Into<String>, cell_type: impl Into<String>) -> Self {
        Self {
            id: CellId::from_raw(0),
            name: name.into(),
            cell_type: cell_type.into(),
            connections: Vec::new(),
            attributes: BTreeMap::new(),
            par_node: None,
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if this cell is an I/O buffer primitive.
    pub fn is_iob(&self) -> bool {
        matches!(
            self.cell_type.as_str(),
            "GP_IBUF" | "GP_OBUF" | "GP_OBUFT" | "GP_IOBUF"
        )
    }

    /// Returns the name of the pad-facing port for IOB primitives.
    ///
    /// The pad port carries the top-level signal, which is where a vector
    /// bit index lives when a LOC constraint lists one pin per bit.
    pub fn pad_port(&self) -> Option<&'static str> {
        match self.cell_type.as_str() {
            "GP_OBUF" | "GP_OBUFT" => Some("OUT"),
            "GP_IBUF" => Some("IN"),
            "GP_IOBUF" => Some("IO"),
            _ => None,
        }
    }

    /// Returns the nets attached to `port`, if any are recorded.
    pub fn connection(&self, port: &str) -> Option<&[NetId]> {
        self.connections
            .iter()
            .find(|c| c.port == port)
            .map(|c| c.nets.as_slice())
    }

    /// Returns the attribute value for `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iob_detection() {
        assert!(Cell::new("u1", "GP_IBUF").is_iob());
        assert!(Cell::new("u2", "GP_OBUF").is_iob());
        assert!(Cell::new("u3", "GP_OBUFT").is_iob());
        assert!(Cell::new("u4", "GP_IOBUF").is_iob());
        assert!(!Cell::new("u5", "GP_2LUT").is_iob());
    }

    #[test]
    fn pad_ports() {
        assert_eq!(Cell::new("u", "GP_OBUF").pad_port(), Some("OUT"));
        assert_eq!(Cell::new("u", "GP_OBUFT").pad_port(), Some("OUT"));
        assert_eq!(Cell::new("u", "GP_IBUF").pad_port(), Some("IN"));
        assert_eq!(Cell::new("u", "GP_IOBUF").pad_port(), Some("IO"));
        assert_eq!(Cell::new("u", "GP_DFF").pad_port(), None);
    }

    #[test]
    fn attributes() {
        let cell = Cell::new("u1", "GP_IBUF").with_attribute("LOC", "P3");
        assert_eq!(cell.attribute("LOC"), Some("P3"));
        assert_eq!(cell.attribute("KEEP"), None);
    }

    #[test]
    fn connection_lookup() {
        let mut cell = Cell::new("u1", "GP_2LUT");
        cell.connections.push(Connection {
            port: "IN0".into(),
            nets: vec![NetId::from_raw(4)],
        });
        assert_eq!(cell.connection("IN0"), Some(&[NetId::from_raw(4)][..]));
        assert_eq!(cell.connection("IN1"), None);
    }

    #[test]
    fn new_cell_has_no_par_node() {
        assert!(Cell::new("u1", "GP_INV").par_node.is_none());
    }
}
