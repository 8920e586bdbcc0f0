//! Typed nodes, directed labelled edges, and the ordered graph container.
//!
//! A [`Graph`] is an append-only arena of [`Node`]s. Iteration order is the
//! construction order; this is observable because the downstream placer's
//! tie-breaking is order-sensitive. Each node owns its outbound [`Edge`]s and
//! carries an opaque payload (a device site on the device side, a netlist
//! cell on the netlist side) referenced by a stable arena index.

use crate::ids::NodeId;
use crate::label::Label;
use serde::{Deserialize, Serialize};

/// A directed, labelled connection between two nodes of one graph.
///
/// Edges are owned by their source node and are not deduplicated: two edges
/// with identical endpoints but differing ports are distinct routing
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The node this edge leaves from.
    pub source: NodeId,
    /// Name of the output port on the source.
    pub source_port: String,
    /// The node this edge arrives at.
    pub dest: NodeId,
    /// Name of the input port on the destination, vector-indexed where
    /// applicable (e.g. `DIN[3]`).
    pub dest_port: String,
    /// The textual tag the router uses to identify which signal the edge
    /// carries through a shared routing resource. This is the destination
    /// port name, not a globally unique net identifier.
    pub net_label: String,
}

/// One element of a PAR graph.
///
/// A node matches a demand label *d* iff *d* is the node's primary label or
/// one of its alternates. The alternate set replaces subtyping: a LUT4 site
/// does not *inherit* from LUT3, it simply bears both labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node<P> {
    id: NodeId,
    primary: Label,
    alternates: Vec<Label>,
    payload: P,
    edges: Vec<Edge>,
    mate: Option<NodeId>,
}

impl<P> Node<P> {
    /// Returns this node's ID within its graph.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the primary label.
    pub fn primary(&self) -> Label {
        self.primary
    }

    /// Returns the alternate labels in insertion order.
    pub fn alternates(&self) -> &[Label] {
        &self.alternates
    }

    /// Iterates over the full label set: primary first, then alternates.
    pub fn label_set(&self) -> impl Iterator<Item = Label> + '_ {
        std::iter::once(self.primary).chain(self.alternates.iter().copied())
    }

    /// Returns `true` if this node can satisfy a demand for `label`.
    pub fn matches(&self, label: Label) -> bool {
        self.primary == label || self.alternates.contains(&label)
    }

    /// Returns the opaque payload reference.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the outbound edges in emission order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the mate assigned by the placer, if any.
    pub fn mate(&self) -> Option<NodeId> {
        self.mate
    }

    /// Records the placer's chosen mate for this node.
    ///
    /// The mate slot is written at most once per placement; re-assigning an
    /// already-mated node trips a debug assertion.
    pub fn set_mate(&mut self, mate: NodeId) {
        debug_assert!(self.mate.is_none(), "node {} already has a mate", self.id);
        self.mate = Some(mate);
    }
}

/// An ordered, append-only collection of nodes.
///
/// The type parameter `P` is the payload reference type: a site index for the
/// device graph, a cell index for the netlist graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph<P> {
    nodes: Vec<Node<P>>,
}

impl<P> Graph<P> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node with the given primary label and payload, returning
    /// its ID. The alternate set starts empty.
    pub fn add_node(&mut self, primary: Label, payload: P) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            primary,
            alternates: Vec::new(),
            payload,
            edges: Vec::new(),
            mate: None,
        });
        id
    }

    /// Appends `label` to the node's alternate set. Duplicates (including
    /// the primary label) are ignored.
    pub fn add_alternate(&mut self, id: NodeId, label: Label) {
        let node = self.node_mut(id);
        if node.primary != label && !node.alternates.contains(&label) {
            node.alternates.push(label);
        }
    }

    /// Appends an outbound edge to the source node.
    ///
    /// The net label is the destination port name. Port names are not
    /// validated here; they are strings matched later by the router.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        source_port: impl Into<String>,
        dest: NodeId,
        dest_port: impl Into<String>,
    ) {
        let dest_port = dest_port.into();
        let net_label = dest_port.clone();
        self.node_mut(source).edges.push(Edge {
            source,
            source_port: source_port.into(),
            dest,
            dest_port,
            net_label,
        });
    }

    /// Returns the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn node(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id.as_raw() as usize]
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over `(ID, node)` pairs in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<P>)> {
        self.nodes.iter().map(|n| (n.id, n))
    }

    /// Iterates over nodes in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<P>> {
        self.nodes.iter()
    }

    /// Iterates over every edge arriving at `dest`, scanning all nodes in
    /// construction order.
    pub fn edges_into(&self, dest: NodeId) -> impl Iterator<Item = &Edge> {
        self.nodes
            .iter()
            .flat_map(|n| n.edges.iter())
            .filter(move |e| e.dest == dest)
    }

    /// Returns the mate of the given node, if the placer assigned one.
    pub fn mate_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).mate
    }
}

impl<P> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelRegistry;

    fn two_labels() -> (LabelRegistry, Label, Label) {
        let mut reg = LabelRegistry::new();
        let a = reg.allocate("GP_2LUT");
        let b = reg.allocate("GP_3LUT");
        (reg, a, b)
    }

    #[test]
    fn nodes_keep_insertion_order() {
        let (_, a, b) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        g.add_node(a, 10);
        g.add_node(b, 20);
        g.add_node(a, 30);
        let payloads: Vec<u32> = g.nodes().map(|n| *n.payload()).collect();
        assert_eq!(payloads, vec![10, 20, 30]);
        let ids: Vec<u32> = g.iter().map(|(id, _)| id.as_raw()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn label_set_is_primary_plus_alternates() {
        let (_, a, b) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let n = g.add_node(b, 0);
        g.add_alternate(n, a);
        let set: Vec<Label> = g.node(n).label_set().collect();
        assert_eq!(set, vec![b, a]);
        assert!(g.node(n).matches(a));
        assert!(g.node(n).matches(b));
    }

    #[test]
    fn add_alternate_is_idempotent() {
        let (_, a, b) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let n = g.add_node(b, 0);
        g.add_alternate(n, a);
        g.add_alternate(n, a);
        g.add_alternate(n, b); // primary is never duplicated into alternates
        assert_eq!(g.node(n).alternates(), &[a]);
    }

    #[test]
    fn node_without_alternates_matches_only_primary() {
        let (_, a, b) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let n = g.add_node(a, 0);
        assert!(g.node(n).matches(a));
        assert!(!g.node(n).matches(b));
    }

    #[test]
    fn edges_are_not_deduplicated() {
        let (_, a, _) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let x = g.add_node(a, 0);
        let y = g.add_node(a, 1);
        g.add_edge(x, "OUT", y, "IN0");
        g.add_edge(x, "OUT", y, "IN1");
        g.add_edge(x, "OUT", y, "IN0");
        assert_eq!(g.node(x).edges().len(), 3);
    }

    #[test]
    fn net_label_is_dest_port() {
        let (_, a, _) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let x = g.add_node(a, 0);
        let y = g.add_node(a, 1);
        g.add_edge(x, "OUT", y, "DIN[3]");
        let edge = &g.node(x).edges()[0];
        assert_eq!(edge.dest_port, "DIN[3]");
        assert_eq!(edge.net_label, "DIN[3]");
        assert_eq!(edge.source_port, "OUT");
    }

    #[test]
    fn edges_into_scans_all_sources() {
        let (_, a, _) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let x = g.add_node(a, 0);
        let y = g.add_node(a, 1);
        let z = g.add_node(a, 2);
        g.add_edge(x, "OUT", z, "CLK");
        g.add_edge(y, "OUT", z, "CLK");
        g.add_edge(x, "OUT", y, "IN");
        assert_eq!(g.edges_into(z).count(), 2);
        assert_eq!(g.edges_into(y).count(), 1);
        assert_eq!(g.edges_into(x).count(), 0);
    }

    #[test]
    fn mate_starts_empty_and_is_settable() {
        let (_, a, _) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let n = g.add_node(a, 0);
        assert_eq!(g.mate_of(n), None);
        g.node_mut(n).set_mate(NodeId::from_raw(7));
        assert_eq!(g.mate_of(n), Some(NodeId::from_raw(7)));
    }

    #[test]
    #[should_panic(expected = "already has a mate")]
    #[cfg(debug_assertions)]
    fn mate_is_set_at_most_once() {
        let (_, a, _) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let n = g.add_node(a, 0);
        g.node_mut(n).set_mate(NodeId::from_raw(1));
        g.node_mut(n).set_mate(NodeId::from_raw(2));
    }

    #[test]
    fn serde_roundtrip() {
        let (_, a, b) = two_labels();
        let mut g: Graph<u32> = Graph::new();
        let x = g.add_node(b, 4);
        let y = g.add_node(a, 5);
        g.add_alternate(x, a);
        g.add_edge(x, "OUT", y, "IN0");
        let json = serde_json::to_string(&g).unwrap();
        let restored: Graph<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.node(x).alternates(), &[a]);
        assert_eq!(restored.node(x).edges()[0].dest, y);
    }

    #[test]
    fn identical_construction_serializes_identically() {
        let build = || {
            let (_, a, b) = two_labels();
            let mut g: Graph<u32> = Graph::new();
            let x = g.add_node(b, 0);
            let y = g.add_node(a, 1);
            g.add_alternate(x, a);
            g.add_edge(x, "OUT", y, "IN1");
            g.add_edge(x, "OUT", y, "IN0");
            g
        };
        let first = serde_json::to_string(&build()).unwrap();
        let second = serde_json::to_string(&build()).unwrap();
        assert_eq!(first, second);
    }
}
