//! The GreenPAK4 primitive library as port-only modules.
//!
//! Synthesis emits cells whose types name these primitives. The netlist-graph
//! builder needs each primitive's port-direction table to tell drivers from
//! loads, so the library is seeded into every [`Netlist`](crate::Netlist)
//! created through [`Netlist::with_primitives`](crate::Netlist::with_primitives).

use crate::module::NetlistModule;
use crate::port::{ModulePort, PortDirection};

/// Port-direction tables for every GreenPAK4 primitive, including the
/// DFF set/reset synonyms and the tristate output buffer.
const PRIMITIVES: &[(&str, &[&str], &[&str], &[&str])] = &[
    // (type, inputs, outputs, inouts)
    ("GP_IBUF", &["IN"], &["OUT"], &[]),
    ("GP_OBUF", &["IN"], &["OUT"], &[]),
    ("GP_OBUFT", &["IN", "OE"], &["OUT"], &[]),
    ("GP_IOBUF", &["IN", "OE"], &["OUT"], &["IO"]),
    ("GP_2LUT", &["IN0", "IN1"], &["OUT"], &[]),
    ("GP_3LUT", &["IN0", "IN1", "IN2"], &["OUT"], &[]),
    ("GP_4LUT", &["IN0", "IN1", "IN2", "IN3"], &["OUT"], &[]),
    ("GP_INV", &["IN"], &["OUT"], &[]),
    ("GP_DFF", &["D", "CLK"], &["Q"], &[]),
    ("GP_DFFR", &["D", "CLK", "nRST"], &["Q"], &[]),
    ("GP_DFFS", &["D", "CLK", "nSET"], &["Q"], &[]),
    ("GP_DFFSR", &["D", "CLK", "nSR"], &["Q"], &[]),
    ("GP_SHREG", &["IN", "CLK", "nRST"], &["OUTA", "OUTB"], &[]),
    ("GP_COUNT8", &["CLK", "RST"], &["OUT"], &[]),
    ("GP_COUNT14", &["CLK", "RST"], &["OUT"], &[]),
    ("GP_COUNT8_ADV", &["CLK", "RST", "UP", "KEEP"], &["OUT"], &[]),
    ("GP_COUNT14_ADV", &["CLK", "RST", "UP", "KEEP"], &["OUT"], &[]),
    ("GP_ACMP", &["PWREN", "VIN", "VREF"], &["OUT"], &[]),
    ("GP_VREF", &["VIN"], &["VOUT"], &[]),
    ("GP_DAC", &["DIN", "VREF"], &["VOUT"], &[]),
    ("GP_PGA", &["VIN_P", "VIN_N", "VIN_SEL"], &["VOUT"], &[]),
    ("GP_ABUF", &["IN"], &["OUT"], &[]),
    ("GP_BANDGAP", &[], &["OK"], &[]),
    ("GP_LFOSC", &["PWRDN"], &["CLKOUT"], &[]),
    ("GP_RCOSC", &["PWRDN"], &["CLKOUT", "CLKOUT_PREDIV"], &[]),
    ("GP_RINGOSC", &["PWRDN"], &["CLKOUT", "CLKOUT_PREDIV"], &[]),
    ("GP_POR", &[], &["RST_DONE"], &[]),
    ("GP_SYSRESET", &["RST"], &[], &[]),
    ("GP_VDD", &[], &["OUT"], &[]),
    ("GP_VSS", &[], &["OUT"], &[]),
];

/// Builds the primitive library modules in a fixed order.
pub fn primitive_modules() -> Vec<NetlistModule> {
    PRIMITIVES
        .iter()
        .map(|&(name, inputs, outputs, inouts)| {
            let mut module = NetlistModule::new(name);
            for port in inputs {
                module.add_port(ModulePort::new(*port, PortDirection::Input));
            }
            for port in outputs {
                module.add_port(ModulePort::new(*port, PortDirection::Output));
            }
            for port in inouts {
                module.add_port(ModulePort::new(*port, PortDirection::Inout));
            }
            module
        })
        .collect()
}
