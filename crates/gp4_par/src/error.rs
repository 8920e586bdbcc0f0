//! Fatal user errors raised during graph construction.
//!
//! Every variant is a structural illegality in the user's design. There is
//! no recovery and no partial output: the builder stops at the first error,
//! and a driver binary exits non-zero. The `Display` strings are stable
//! tool output consumed by downstream scripts; do not reword them.

use thiserror::Error;

/// A fatal, user-facing error found while building the PAR graphs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParError {
    /// A netlist cell's type is not in the primitive registry.
    #[error("Cell \"{cell}\" is of type \"{cell_type}\" which is not a valid GreenPak4 primitive")]
    UnknownPrimitive {
        /// The offending cell's instance name.
        cell: String,
        /// The unrecognized type name.
        cell_type: String,
    },

    /// A net touches more than one top-level port with no IOB between them.
    #[error("Net \"{net}\" is connected directly to multiple top-level ports (need an IOB)")]
    MultiplePortDrivers {
        /// The offending net's name.
        net: String,
    },

    /// A top-level port reaches a cell that is not an input-capable IOB.
    #[error("Net \"{net}\" directly drives cell {cell} port {port} (type {cell_type}, should be IOB)")]
    PortDrivesNonIob {
        /// The offending net's name.
        net: String,
        /// The driven cell's instance name.
        cell: String,
        /// The driven port name.
        port: String,
        /// The driven cell's type.
        cell_type: String,
    },

    /// A net has loads but neither a cell driver nor a top-level source.
    #[error("Net \"{net}\" has loads, but no driver")]
    UndrivenNet {
        /// The offending net's name.
        net: String,
    },
}
