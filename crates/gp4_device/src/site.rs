//! Physical sites: the placement targets of the device graph.

use crate::ids::SiteId;
use gp4_graph::NodeId;
use serde::{Deserialize, Serialize};

/// The kind of a physical site. Closed enumeration for the GreenPAK4 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteKind {
    /// An I/O block: a package pin plus its buffer logic.
    Iob,
    /// A 2-input lookup table.
    Lut2,
    /// A 3-input lookup table.
    Lut3,
    /// A 4-input lookup table.
    Lut4,
    /// A D flip-flop without set/reset.
    Dff,
    /// A D flip-flop with set/reset capability.
    Dffsr,
    /// An 8-bit counter/delay.
    Count8,
    /// An 8-bit counter/delay with embedded FSM.
    Count8Adv,
    /// A 14-bit counter/delay.
    Count14,
    /// A 14-bit counter/delay with embedded FSM.
    Count14Adv,
    /// A shift register.
    Shreg,
    /// A dedicated inverter.
    Inv,
    /// An analog comparator.
    Acmp,
    /// A programmable voltage reference.
    Vref,
    /// A digital-to-analog converter.
    Dac,
    /// A programmable-gain amplifier.
    Pga,
    /// An analog buffer.
    Abuf,
    /// The low-frequency oscillator.
    Lfosc,
    /// The RC oscillator.
    Rcosc,
    /// The ring oscillator.
    Ringosc,
    /// The bandgap reference.
    Bandgap,
    /// The power-on-reset block.
    Por,
    /// The system reset block.
    Sysreset,
    /// The VDD power rail (constant one).
    Vdd,
    /// The VSS power rail (constant zero).
    Vss,
}

/// Whether an IOB's bitfile format supports bidirectional operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IobFlavor {
    /// Type A: full-featured, can be bidirectional.
    TypeA,
    /// Type B: no output-enable, cannot be bidirectional.
    TypeB,
}

/// I/O-block-specific site attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IobInfo {
    /// The package pin number.
    pub pin: u32,
    /// Bitfile format variant.
    pub flavor: IobFlavor,
    /// `true` if the pad has no output driver at all.
    pub input_only: bool,
}

/// One physical resource of the device.
///
/// `inputs` and `outputs` list the site's general-fabric routing terminals in
/// a fixed order; dedicated routes may reference additional port names that
/// deliberately do not appear here (analog terminals, static-config inputs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// The unique ID of this site within its device.
    pub id: SiteId,
    /// The site kind.
    pub kind: SiteKind,
    /// Index within the site's kind (e.g. the 3 in `COUNT8_3`).
    pub index: u32,
    /// Which of the two routing matrices the site belongs to (0 or 1).
    pub matrix: u8,
    /// Base word of the site's input mux selectors in the bitstream.
    pub input_base: u32,
    /// Base word of the site's outputs in the matrix net numbering.
    pub output_base: u32,
    /// Base bit of the site's configuration block.
    pub config_base: u32,
    /// General-fabric input port names, in routing order.
    pub inputs: Vec<String>,
    /// General-fabric output port names, in routing order.
    pub outputs: Vec<String>,
    /// IOB-only attributes.
    pub iob: Option<IobInfo>,
    /// Back-reference to this site's device-graph node, written once by the
    /// graph builder.
    pub par_node: Option<NodeId>,
}

impl Site {
    /// Returns `true` if this flip-flop site has set/reset capability.
    pub fn has_set_reset(&self) -> bool {
        self.kind == SiteKind::Dffsr
    }

    /// Returns the counter depth in bits, or `None` for non-counter sites.
    pub fn counter_depth(&self) -> Option<u32> {
        match self.kind {
            SiteKind::Count8 | SiteKind::Count8Adv => Some(8),
            SiteKind::Count14 | SiteKind::Count14Adv => Some(14),
            _ => None,
        }
    }

    /// Returns `true` if this counter site has an embedded FSM.
    pub fn has_fsm(&self) -> bool {
        matches!(self.kind, SiteKind::Count8Adv | SiteKind::Count14Adv)
    }

    /// Returns the package pin number for IOB sites.
    pub fn pin_number(&self) -> Option<u32> {
        self.iob.map(|info| info.pin)
    }

    /// Returns `true` for IOB sites whose pad has no output driver.
    pub fn is_input_only(&self) -> bool {
        self.iob.map(|info| info.input_only).unwrap_or(false)
    }

    /// Returns `true` if `port` is one of this site's general-fabric inputs.
    pub fn is_general_fabric_input(&self, port: &str) -> bool {
        self.inputs.iter().any(|p| p == port)
    }

    /// For power rails, the constant digital value the rail drives.
    pub fn rail_value(&self) -> Option<bool> {
        match self.kind {
            SiteKind::Vdd => Some(true),
            SiteKind::Vss => Some(false),
            _ => None,
        }
    }
}
