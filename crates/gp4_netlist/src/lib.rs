//! Synthesized-netlist data model for the gp4 toolchain.
//!
//! This crate defines the in-memory form of a structural GreenPAK4 netlist
//! as produced by an upstream synthesis tool: a [`Netlist`] holding modules,
//! each [`NetlistModule`] holding ordered cells, nets, and ports. Parsing is
//! a collaborator concern; this crate only fixes the shape the PAR core
//! consumes.
//!
//! Primitive cell types (`GP_2LUT`, `GP_DFF`, ...) are themselves modules
//! with a port-direction table. [`Netlist::with_primitives`] seeds the full
//! GreenPAK4 primitive library so driver/load scans work without a parser.

#![warn(missing_docs)]

pub mod cell;
pub mod ids;
pub mod module;
pub mod net;
pub mod netlist;
pub mod port;
pub mod primitives;

pub use cell::{Cell, Connection};
pub use ids::{CellId, ModuleId, NetId, PortId};
pub use module::NetlistModule;
pub use net::{CellPort, Net};
pub use netlist::Netlist;
pub use port::{ModulePort, PortDirection};
