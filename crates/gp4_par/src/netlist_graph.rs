//! Netlist-graph construction.
//!
//! Builds one node per synthesized cell, resolving the cell's primitive type
//! against the label registry, then converts every multi-fanout net into
//! point-to-point edges: one edge from the driver to each load, tagged with
//! the load port's name. Nets touched by top-level ports are special: they
//! may only reach input-capable IOB cells, and no edges are emitted for them
//! because the port is realized by the IOB placement itself.

use crate::error::ParError;
use gp4_graph::{Graph, LabelRegistry, NodeId};
use gp4_netlist::{CellId, Netlist, NetlistModule, PortDirection};

/// Builds the netlist graph for the top module of `netlist`.
///
/// Writes a back-reference onto every cell. Stops at the first structural
/// illegality; there is no partial output.
pub fn build_netlist_graph(
    netlist: &mut Netlist,
    registry: &LabelRegistry,
) -> Result<Graph<CellId>, ParError> {
    let mut graph = Graph::new();
    let Some(top_id) = netlist.top() else {
        return Ok(graph);
    };

    // One node per cell. Unknown primitive types are a user error, not
    // something we can fabricate behavior for.
    {
        let top = netlist.module_mut(top_id);
        for i in 0..top.cell_count() {
            let id = CellId::from_raw(i as u32);
            let cell = top.cell(id);
            let Some(label) = registry.resolve(&cell.cell_type) else {
                return Err(ParError::UnknownPrimitive {
                    cell: cell.name.clone(),
                    cell_type: cell.cell_type.clone(),
                });
            };
            let node = graph.add_node(label, id);
            top.cell_mut(id).par_node = Some(node);
        }
    }

    // Break every point-to-multipoint net into point-to-point links
    let netlist = &*netlist;
    let top = netlist.module(top_id);
    for net in top.nets() {
        // Nets touched by a top-level input are sourced by that port
        let sourced_by_port = net
            .ports
            .iter()
            .any(|&p| top.port(p).direction != PortDirection::Output);

        // Find the single cell driver, if any. Anything that is not a plain
        // input can drive: outputs and the bidirectional pad ports.
        let mut source: Option<(NodeId, &str)> = None;
        for nodeport in &net.nodeports {
            match port_direction(netlist, top, nodeport.cell, &nodeport.port) {
                Some(PortDirection::Input) | None => continue,
                Some(_) => {}
            }
            let Some(node) = top.cell(nodeport.cell).par_node else {
                continue;
            };
            source = Some((node, nodeport.port.as_str()));
        }

        if sourced_by_port {
            if net.ports.len() != 1 {
                return Err(ParError::MultiplePortDrivers {
                    net: net.name.clone(),
                });
            }

            // A port can only reach the fabric through an IOB, so every
            // cell on this net must be one. No edges: the port is realized
            // by the IOB placement itself.
            for nodeport in &net.nodeports {
                let cell = top.cell(nodeport.cell);
                if cell.cell_type == "GP_IBUF" || cell.cell_type == "GP_IOBUF" {
                    continue;
                }
                return Err(ParError::PortDrivesNonIob {
                    net: net.name.clone(),
                    cell: cell.name.clone(),
                    port: nodeport.port.clone(),
                    cell_type: cell.cell_type.clone(),
                });
            }
        } else {
            let mut has_loads = false;
            for nodeport in &net.nodeports {
                if port_direction(netlist, top, nodeport.cell, &nodeport.port)
                    == Some(PortDirection::Output)
                {
                    continue;
                }
                has_loads = true;
                if let Some((source_node, source_port)) = source {
                    let Some(load_node) = top.cell(nodeport.cell).par_node else {
                        continue;
                    };
                    graph.add_edge(source_node, source_port, load_node, nodeport.net_label());
                }
            }

            // Undriven nets are legal only if nothing listens to them; that
            // happens when bits of a vector were absorbed into hard IP
            if source.is_none() && has_loads {
                return Err(ParError::UndrivenNet {
                    net: net.name.clone(),
                });
            }
        }
    }

    Ok(graph)
}

/// Looks up the direction of `port` on the cell's primitive module.
///
/// Ports the library does not describe yield `None` and are treated as
/// loads, never as drivers.
fn port_direction(
    netlist: &Netlist,
    top: &NetlistModule,
    cell: CellId,
    port: &str,
) -> Option<PortDirection> {
    netlist
        .module_by_name(&top.cell(cell).cell_type)
        .and_then(|module| module.port_direction(port))
}
