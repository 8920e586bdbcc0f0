//! Opaque ID newtypes for netlist entities.
//!
//! Each ID is a thin `u32` wrapper used as an arena index within a
//! [`Netlist`](crate::Netlist) or [`NetlistModule`](crate::NetlistModule).

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a module in a netlist.
    ModuleId
);

define_id!(
    /// Opaque, copyable ID for a cell within a module.
    CellId
);

define_id!(
    /// Opaque, copyable ID for a net within a module.
    NetId
);

define_id!(
    /// Opaque, copyable ID for a module port.
    PortId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        assert_eq!(CellId::from_raw(9).as_raw(), 9);
        assert_eq!(NetId::from_raw(0).as_raw(), 0);
    }

    #[test]
    fn equality() {
        assert_eq!(ModuleId::from_raw(1), ModuleId::from_raw(1));
        assert_ne!(PortId::from_raw(1), PortId::from_raw(2));
    }

    #[test]
    fn serde_roundtrip() {
        let id = NetId::from_raw(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(serde_json::from_str::<NetId>(&json).unwrap(), id);
    }
}
