//! Place-and-route graph primitives for the gp4 toolchain.
//!
//! This crate provides the label-based matching machinery at the heart of
//! GreenPAK4 place and route: typed [`Node`]s carrying a primary label plus
//! alternate labels, directed labelled [`Edge`]s, the ordered [`Graph`]
//! container, and the [`LabelRegistry`] that maps primitive type names to
//! opaque numeric [`Label`]s.
//!
//! Two graphs are built per compilation, one for the physical device and
//! one for the synthesized netlist, and they share a single label namespace.
//! A netlist node may be placed onto a device node exactly when the device
//! node's label set contains the netlist node's primary label; the chosen
//! correspondence is recorded in the node's *mate* slot.

#![warn(missing_docs)]

pub mod graph;
pub mod ids;
pub mod label;

pub use graph::{Edge, Graph, Node};
pub use ids::NodeId;
pub use label::{Label, LabelRegistry};
