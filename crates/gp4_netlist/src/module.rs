//! Modules: ordered collections of ports, cells, and nets.

use crate::cell::{Cell, Connection};
use crate::ids::{CellId, NetId, PortId};
use crate::net::{CellPort, Net};
use crate::port::{ModulePort, PortDirection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One module of a synthesized netlist.
///
/// For the design this is the top module being placed and routed; primitive
/// types are represented as port-only modules providing the direction table
/// used to classify cell connections.
///
/// Cells, nets, and ports are stored in insertion order; the PAR core's
/// output is reproducible because it iterates them in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetlistModule {
    /// The module name (a primitive type name for library modules).
    pub name: String,
    ports: Vec<ModulePort>,
    cells: Vec<Cell>,
    nets: Vec<Net>,
    /// Auxiliary index: port name to ID (rebuilt on deserialization).
    #[serde(skip)]
    port_by_name: HashMap<String, PortId>,
    /// Auxiliary index: cell name to ID (rebuilt on deserialization).
    #[serde(skip)]
    cell_by_name: HashMap<String, CellId>,
}

impl NetlistModule {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
            cells: Vec::new(),
            nets: Vec::new(),
            port_by_name: HashMap::new(),
            cell_by_name: HashMap::new(),
        }
    }

    /// Adds a port and returns its ID.
    pub fn add_port(&mut self, mut port: ModulePort) -> PortId {
        let id = PortId::from_raw(self.ports.len() as u32);
        port.id = id;
        self.port_by_name.insert(port.name.clone(), id);
        self.ports.push(port);
        id
    }

    /// Adds a cell and returns its ID.
    pub fn add_cell(&mut self, mut cell: Cell) -> CellId {
        let id = CellId::from_raw(self.cells.len() as u32);
        cell.id = id;
        self.cell_by_name.insert(cell.name.clone(), id);
        self.cells.push(cell);
        id
    }

    /// Adds a net and returns its ID.
    pub fn add_net(&mut self, mut net: Net) -> NetId {
        let id = NetId::from_raw(self.nets.len() as u32);
        net.id = id;
        self.nets.push(net);
        id
    }

    /// Attaches a cell port to a net, recording the connection point on the
    /// net and the net on the cell's connection list.
    ///
    /// For vector ports, call once per bit in ascending bit order.
    ///
    /// # Panics
    ///
    /// Panics if either ID is out of bounds.
    pub fn connect_cell(&mut self, net: NetId, cell: CellId, port: &str, bit: Option<u32>) {
        self.nets[net.as_raw() as usize].nodeports.push(CellPort {
            cell,
            port: port.to_string(),
            bit,
        });
        let cell = &mut self.cells[cell.as_raw() as usize];
        match cell.connections.iter_mut().find(|c| c.port == port) {
            Some(conn) => conn.nets.push(net),
            None => cell.connections.push(Connection {
                port: port.to_string(),
                nets: vec![net],
            }),
        }
    }

    /// Attaches a top-level port directly to a net.
    ///
    /// # Panics
    ///
    /// Panics if the net ID is out of bounds.
    pub fn connect_port(&mut self, net: NetId, port: PortId) {
        self.nets[net.as_raw() as usize].ports.push(port);
    }

    /// Returns the port with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn port(&self, id: PortId) -> &ModulePort {
        &self.ports[id.as_raw() as usize]
    }

    /// Returns the direction of the named port, if the module declares it.
    pub fn port_direction(&self, name: &str) -> Option<PortDirection> {
        self.port_by_name
            .get(name)
            .map(|&id| self.port(id).direction)
    }

    /// Returns the cell with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the cell with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.as_raw() as usize]
    }

    /// Returns the cell with the given instance name.
    pub fn cell_by_name(&self, name: &str) -> Option<&Cell> {
        self.cell_by_name.get(name).map(|&id| self.cell(id))
    }

    /// Returns the net with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.as_raw() as usize]
    }

    /// Iterates over ports in declaration order.
    pub fn ports(&self) -> impl Iterator<Item = &ModulePort> {
        self.ports.iter()
    }

    /// Iterates over cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterates over nets in insertion order.
    pub fn nets(&self) -> impl Iterator<Item = &Net> {
        self.nets.iter()
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Resolves the `LOC` constraint for a cell.
    ///
    /// For non-IOB cells this is the attribute verbatim. For IOB cells whose
    /// pad net is one bit of a vector, the attribute is a space-separated
    /// per-bit pin list and the entry matching the pad net's bit index is
    /// returned. Returns `None` when the attribute is absent or the vector
    /// entry is malformed.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn cell_loc(&self, id: CellId) -> Option<String> {
        let cell = self.cell(id);
        let loc = cell.attribute("LOC")?;
        if !cell.is_iob() {
            return Some(loc.to_string());
        }

        // The pad signal is always the vector-constrained one
        let pad = cell.pad_port()?;
        let nets = cell.connection(pad)?;
        let net_name = &self.net(*nets.first()?).name;

        let Some(open) = net_name.find('[') else {
            return Some(loc.to_string());
        };
        let index: usize = net_name[open + 1..].trim_end_matches(']').parse().ok()?;
        loc.split(' ').nth(index).map(str::to_string)
    }

    /// Rebuilds auxiliary indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.port_by_name.clear();
        for (i, port) in self.ports.iter().enumerate() {
            self.port_by_name
                .insert(port.name.clone(), PortId::from_raw(i as u32));
        }
        self.cell_by_name.clear();
        for (i, cell) in self.cells.iter().enumerate() {
            self.cell_by_name
                .insert(cell.name.clone(), CellId::from_raw(i as u32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passthrough_module() -> NetlistModule {
        let mut m = NetlistModule::new("top");
        let p1 = m.add_port(ModulePort::new("P1", PortDirection::Input));
        m.add_port(ModulePort::new("P2", PortDirection::Output));
        let u1 = m.add_cell(Cell::new("u1", "GP_IBUF"));
        let u2 = m.add_cell(Cell::new("u2", "GP_OBUF"));
        let pad_in = m.add_net(Net::new("P1"));
        let w = m.add_net(Net::new("w"));
        m.connect_port(pad_in, p1);
        m.connect_cell(pad_in, u1, "IN", None);
        m.connect_cell(w, u1, "OUT", None);
        m.connect_cell(w, u2, "IN", None);
        m
    }

    #[test]
    fn ids_are_sequential() {
        let m = passthrough_module();
        let ids: Vec<u32> = m.cells().map(|c| c.id.as_raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn port_direction_lookup() {
        let m = passthrough_module();
        assert_eq!(m.port_direction("P1"), Some(PortDirection::Input));
        assert_eq!(m.port_direction("P2"), Some(PortDirection::Output));
        assert_eq!(m.port_direction("P3"), None);
    }

    #[test]
    fn connect_cell_records_both_sides() {
        let m = passthrough_module();
        let w = m.nets().find(|n| n.name == "w").unwrap();
        assert_eq!(w.nodeports.len(), 2);
        assert_eq!(w.nodeports[0].port, "OUT");
        assert_eq!(w.nodeports[1].port, "IN");
        let u1 = m.cell_by_name("u1").unwrap();
        assert_eq!(u1.connection("OUT"), Some(&[w.id][..]));
    }

    #[test]
    fn vector_connections_preserve_bit_order() {
        let mut m = NetlistModule::new("top");
        let dac = m.add_cell(Cell::new("dac0", "GP_DAC"));
        let n0 = m.add_net(Net::new("d[0]"));
        let n1 = m.add_net(Net::new("d[1]"));
        m.connect_cell(n0, dac, "DIN", Some(0));
        m.connect_cell(n1, dac, "DIN", Some(1));
        let cell = m.cell(dac);
        assert_eq!(cell.connection("DIN"), Some(&[n0, n1][..]));
    }

    #[test]
    fn scalar_loc_passthrough() {
        let mut m = NetlistModule::new("top");
        let u = m.add_cell(Cell::new("u1", "GP_2LUT").with_attribute("LOC", "LUT2_3"));
        assert_eq!(m.cell_loc(u).as_deref(), Some("LUT2_3"));
    }

    #[test]
    fn iob_scalar_loc() {
        let mut m = NetlistModule::new("top");
        let u = m.add_cell(Cell::new("u1", "GP_IBUF").with_attribute("LOC", "P3"));
        let n = m.add_net(Net::new("din"));
        m.connect_cell(n, u, "IN", None);
        assert_eq!(m.cell_loc(u).as_deref(), Some("P3"));
    }

    #[test]
    fn iob_vector_loc_picks_indexed_pin() {
        let mut m = NetlistModule::new("top");
        let u = m.add_cell(Cell::new("u1", "GP_OBUF").with_attribute("LOC", "P3 P4 P5"));
        let n = m.add_net(Net::new("dout[2]"));
        m.connect_cell(n, u, "OUT", None);
        assert_eq!(m.cell_loc(u).as_deref(), Some("P5"));
    }

    #[test]
    fn iob_vector_loc_out_of_range_is_none() {
        let mut m = NetlistModule::new("top");
        let u = m.add_cell(Cell::new("u1", "GP_OBUF").with_attribute("LOC", "P3 P4"));
        let n = m.add_net(Net::new("dout[5]"));
        m.connect_cell(n, u, "OUT", None);
        assert_eq!(m.cell_loc(u), None);
    }

    #[test]
    fn missing_loc_is_none() {
        let mut m = NetlistModule::new("top");
        let u = m.add_cell(Cell::new("u1", "GP_INV"));
        assert_eq!(m.cell_loc(u), None);
    }

    #[test]
    fn serde_roundtrip_rebuilds_indices() {
        let m = passthrough_module();
        let json = serde_json::to_string(&m).unwrap();
        let mut restored: NetlistModule = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.port_direction("P1"), None); // indices skipped
        restored.rebuild_indices();
        assert_eq!(restored.port_direction("P1"), Some(PortDirection::Input));
        assert!(restored.cell_by_name("u2").is_some());
    }
}
