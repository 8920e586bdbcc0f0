//! Graph construction and label matching for GreenPAK4 place and route.
//!
//! This crate is the heart of the gp4 PAR flow. It turns a synthesized
//! netlist and a device descriptor into two graphs sharing one label
//! namespace:
//!
//! - the **device graph**: one node per physical site, labelled with the
//!   site's kind plus every legal substitution, and edged with all candidate
//!   routes (dense general fabric plus part-specific dedicated routes);
//! - the **netlist graph**: one node per synthesized cell, with every
//!   multi-fanout net broken into point-to-point edges.
//!
//! A downstream annealing placer consumes the pair and assigns each netlist
//! node a *mate* device node whose label set contains the netlist node's
//! primary label. The placer and the bitstream emitter are collaborators;
//! only their interfaces are fixed here.
//!
//! # Usage
//!
//! ```
//! use gp4_device::Device;
//! use gp4_netlist::{Cell, Netlist, NetlistModule};
//!
//! let mut netlist = Netlist::with_primitives();
//! let mut top = NetlistModule::new("top");
//! top.add_cell(Cell::new("ff0", "GP_DFF"));
//! let top_id = netlist.add_module(top);
//! netlist.set_top(top_id);
//!
//! let mut device = Device::slg46620();
//! let graphs = gp4_par::build_graphs(&mut netlist, &mut device).unwrap();
//! assert_eq!(graphs.netlist_graph.len(), 1);
//! assert_eq!(graphs.device_graph.len(), device.site_count());
//! ```

#![warn(missing_docs)]

pub mod device_graph;
pub mod error;
pub mod netlist_graph;

pub use device_graph::build_device_graph;
pub use error::ParError;
pub use netlist_graph::build_netlist_graph;

use gp4_device::{Device, SiteId};
use gp4_graph::{Graph, LabelRegistry};
use gp4_netlist::{CellId, Netlist};
use serde::{Deserialize, Serialize};

/// The output of [`build_graphs`]: both PAR graphs plus the shared label
/// registry, which the placer uses to log human-readable primitive names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltGraphs {
    /// One node per synthesized cell of the top module.
    pub netlist_graph: Graph<CellId>,
    /// One node per physical site of the device.
    pub device_graph: Graph<SiteId>,
    /// The label namespace shared by both graphs.
    pub labels: LabelRegistry,
}

/// Builds the netlist and device graphs for one compilation.
///
/// Pure with respect to its inputs aside from the back-references written
/// onto netlist cells and device sites. Runs to completion in a single pass;
/// the graphs are never mutated afterwards except for the placer-owned mate
/// slots.
///
/// # Errors
///
/// Returns a [`ParError`] on the first structural illegality in the netlist
/// (unknown primitive type, port-to-port nets, a port reaching a non-IOB
/// cell, or a driverless net with loads). There is no partial output.
pub fn build_graphs(netlist: &mut Netlist, device: &mut Device) -> Result<BuiltGraphs, ParError> {
    let mut labels = LabelRegistry::new();
    let device_graph = build_device_graph(device, &mut labels);
    let netlist_graph = build_netlist_graph(netlist, &labels)?;
    Ok(BuiltGraphs {
        netlist_graph,
        device_graph,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp4_netlist::{Cell, NetlistModule};

    #[test]
    fn build_graphs_on_empty_top() {
        let mut netlist = Netlist::with_primitives();
        let top = netlist.add_module(NetlistModule::new("top"));
        netlist.set_top(top);
        let mut device = Device::slg46620();
        let graphs = build_graphs(&mut netlist, &mut device).unwrap();
        assert!(graphs.netlist_graph.is_empty());
        assert_eq!(graphs.device_graph.len(), device.site_count());
        assert_eq!(graphs.labels.len(), 27);
    }

    #[test]
    fn both_graphs_share_the_label_namespace() {
        let mut netlist = Netlist::with_primitives();
        let mut top = NetlistModule::new("top");
        top.add_cell(Cell::new("lut", "GP_2LUT"));
        let top_id = netlist.add_module(top);
        netlist.set_top(top_id);
        let mut device = Device::slg46620();
        let graphs = build_graphs(&mut netlist, &mut device).unwrap();

        let demand = graphs.netlist_graph.nodes().next().unwrap().primary();
        assert_eq!(graphs.labels.name(demand), Some("GP_2LUT"));
        // Some device node matches the demand
        assert!(graphs.device_graph.nodes().any(|n| n.matches(demand)));
    }

    #[test]
    fn netlist_error_propagates() {
        let mut netlist = Netlist::with_primitives();
        let mut top = NetlistModule::new("top");
        top.add_cell(Cell::new("u0", "NOT_A_PRIMITIVE"));
        let top_id = netlist.add_module(top);
        netlist.set_top(top_id);
        let mut device = Device::slg46620();
        let err = build_graphs(&mut netlist, &mut device).unwrap_err();
        assert!(matches!(err, ParError::UnknownPrimitive { .. }));
    }

    #[test]
    fn built_graphs_serialize() {
        let mut netlist = Netlist::with_primitives();
        let top = netlist.add_module(NetlistModule::new("top"));
        netlist.set_top(top);
        let mut device = Device::slg46620();
        let graphs = build_graphs(&mut netlist, &mut device).unwrap();
        let json = serde_json::to_string(&graphs).unwrap();
        let restored: BuiltGraphs = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.device_graph.len(), graphs.device_graph.len());
        assert_eq!(restored.labels.len(), 27);
    }
}
