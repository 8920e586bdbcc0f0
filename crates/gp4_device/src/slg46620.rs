//! The SLG46620V device descriptor.
//!
//! The SLG46620 is a 20-pin, dual-matrix part: pins 2-10 connect to matrix 0
//! and pins 12-20 to matrix 1 (pins 1 and 11 are power). Pin 2 is input-only.
//! Each matrix carries four 2-input LUTs, eight 3-input LUTs, one 4-input
//! LUT, six flip-flops (three with set/reset), five counter/delay blocks,
//! a shift register, and an inverter. The analog subsystem (comparators,
//! references, PGA, analog buffer, bandgap) hangs off matrix 0; the
//! oscillators, DACs, and power-on reset live on matrix 1.

use crate::device::{Device, Part};
use crate::ids::SiteId;
use crate::site::{IobFlavor, IobInfo, Site, SiteKind};

/// Tracks the per-matrix word and bit allocation while sites are created.
struct SiteFactory {
    dev: Device,
    input_word: [u32; 2],
    output_word: [u32; 2],
    config_bit: [u32; 2],
}

impl SiteFactory {
    fn new(part: Part) -> Self {
        Self {
            dev: Device::new(part),
            input_word: [0, 0],
            // Net numbers 0 and 1 belong to the power rails in both
            // matrices; matrix 1 sees them as mirrored constants.
            output_word: [0, 2],
            config_bit: [0, 0],
        }
    }

    fn add(
        &mut self,
        kind: SiteKind,
        matrix: u8,
        inputs: &[&str],
        outputs: &[&str],
        config_bits: u32,
        iob: Option<IobInfo>,
    ) -> SiteId {
        let m = matrix as usize;
        let site = Site {
            id: SiteId::from_raw(0),
            kind,
            index: 0,
            matrix,
            input_base: self.input_word[m],
            output_base: self.output_word[m],
            config_base: self.config_bit[m],
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            iob,
            par_node: None,
        };
        self.input_word[m] += inputs.len() as u32;
        self.output_word[m] += outputs.len() as u32;
        self.config_bit[m] += config_bits;
        self.dev.add_site(site)
    }

    fn add_iob(&mut self, pin: u32, flavor: IobFlavor, input_only: bool) -> SiteId {
        let matrix = if pin <= 10 { 0 } else { 1 };
        let inputs: &[&str] = if input_only {
            &[]
        } else if flavor == IobFlavor::TypeA {
            &["IN", "OE"]
        } else {
            &["IN"]
        };
        self.add(
            SiteKind::Iob,
            matrix,
            inputs,
            &["OUT"],
            10,
            Some(IobInfo {
                pin,
                flavor,
                input_only,
            }),
        )
    }
}

impl Device {
    /// Builds the full SLG46620V site inventory.
    pub fn slg46620() -> Device {
        use IobFlavor::{TypeA, TypeB};

        let mut f = SiteFactory::new(Part::Slg46620);

        // Power rails own net numbers 0 (ground) and 1 (Vdd)
        f.add(SiteKind::Vss, 0, &[], &["OUT"], 0, None);
        f.add(SiteKind::Vdd, 0, &[], &["OUT"], 0, None);

        // IOBs in pin order. Pin 2 has no output driver at all.
        f.add_iob(2, TypeA, true);
        for pin in 3..=10 {
            let flavor = if pin % 2 == 1 { TypeA } else { TypeB };
            f.add_iob(pin, flavor, false);
        }
        for pin in 12..=20 {
            let flavor = if pin % 2 == 1 { TypeA } else { TypeB };
            f.add_iob(pin, flavor, false);
        }

        // LUTs, smallest first
        for matrix in 0..2u8 {
            for _ in 0..4 {
                f.add(SiteKind::Lut2, matrix, &["IN0", "IN1"], &["OUT"], 6, None);
            }
        }
        for matrix in 0..2u8 {
            for _ in 0..8 {
                f.add(
                    SiteKind::Lut3,
                    matrix,
                    &["IN0", "IN1", "IN2"],
                    &["OUT"],
                    11,
                    None,
                );
            }
        }
        for matrix in 0..2u8 {
            f.add(
                SiteKind::Lut4,
                matrix,
                &["IN0", "IN1", "IN2", "IN3"],
                &["OUT"],
                19,
                None,
            );
        }

        // Flip-flops: the first three of each matrix have set/reset
        for matrix in 0..2u8 {
            for i in 0..6 {
                if i < 3 {
                    f.add(SiteKind::Dffsr, matrix, &["D", "CLK", "nSR"], &["Q"], 6, None);
                } else {
                    f.add(SiteKind::Dff, matrix, &["D", "CLK"], &["Q"], 4, None);
                }
            }
        }

        // Counter/delay blocks, five per matrix. Each matrix has one 14-bit
        // FSM-capable block; matrix 0 also has a plain 14-bit block and
        // matrix 1 an 8-bit FSM-capable one.
        let plain = ["CLK", "RST"];
        let fsm = ["CLK", "RST", "UP", "KEEP"];
        f.add(SiteKind::Count14Adv, 0, &fsm, &["OUT"], 44, None);
        f.add(SiteKind::Count14, 0, &plain, &["OUT"], 38, None);
        for _ in 0..3 {
            f.add(SiteKind::Count8, 0, &plain, &["OUT"], 26, None);
        }
        f.add(SiteKind::Count14Adv, 1, &fsm, &["OUT"], 44, None);
        f.add(SiteKind::Count8Adv, 1, &fsm, &["OUT"], 32, None);
        for _ in 0..3 {
            f.add(SiteKind::Count8, 1, &plain, &["OUT"], 26, None);
        }

        for matrix in 0..2u8 {
            f.add(
                SiteKind::Shreg,
                matrix,
                &["IN", "CLK", "nRST"],
                &["OUTA", "OUTB"],
                10,
                None,
            );
        }
        for matrix in 0..2u8 {
            f.add(SiteKind::Inv, matrix, &["IN"], &["OUT"], 1, None);
        }

        // Oscillators feed matrix 1 directly; their pre-divider taps exist
        // only as dedicated routes.
        f.add(SiteKind::Lfosc, 1, &["PWRDN"], &["CLKOUT"], 5, None);
        f.add(SiteKind::Ringosc, 1, &["PWRDN"], &["CLKOUT"], 8, None);
        f.add(SiteKind::Rcosc, 1, &["PWRDN"], &["CLKOUT"], 8, None);

        // Analog subsystem. Terminals are analog-only, so none of these
        // expose general-fabric ports except the comparator power-enable
        // and comparator digital output.
        for _ in 0..6 {
            f.add(SiteKind::Vref, 0, &[], &[], 7, None);
        }
        for _ in 0..6 {
            f.add(SiteKind::Acmp, 0, &["PWREN"], &["OUT"], 14, None);
        }
        for _ in 0..2 {
            f.add(SiteKind::Dac, 1, &[], &[], 11, None);
        }
        f.add(SiteKind::Pga, 0, &[], &[], 8, None);
        f.add(SiteKind::Abuf, 0, &[], &[], 2, None);
        f.add(SiteKind::Bandgap, 0, &[], &["OK"], 3, None);

        f.add(SiteKind::Por, 1, &[], &["RST_DONE"], 2, None);
        f.add(SiteKind::Sysreset, 0, &[], &[], 5, None);

        f.dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_counts() {
        let dev = Device::slg46620();
        assert_eq!(dev.iob_count(), 18);
        assert_eq!(dev.lut2_count(), 8);
        assert_eq!(dev.lut3_count(), 16);
        assert_eq!(dev.lut4_count(), 2);
        assert_eq!(dev.flipflop_count(), 12);
        assert_eq!(dev.counter_count(), 10);
        assert_eq!(dev.shreg_count(), 2);
        assert_eq!(dev.inverter_count(), 2);
        assert_eq!(dev.vref_count(), 6);
        assert_eq!(dev.acmp_count(), 6);
        assert_eq!(dev.dac_count(), 2);
    }

    #[test]
    fn singletons_present() {
        let dev = Device::slg46620();
        assert!(dev.abuf().is_some());
        assert!(dev.bandgap().is_some());
        assert!(dev.lfosc().is_some());
        assert!(dev.pga().is_some());
        assert!(dev.por().is_some());
        assert!(dev.rcosc().is_some());
        assert!(dev.ringosc().is_some());
        assert!(dev.sysreset().is_some());
        assert!(dev.vdd().is_some());
        assert!(dev.vss().is_some());
    }

    #[test]
    fn pins_map_to_matrices() {
        let dev = Device::slg46620();
        for pin in (2..=10).chain(12..=20) {
            let site = dev.site(dev.iob_by_pin(pin).unwrap());
            let expected = if pin <= 10 { 0 } else { 1 };
            assert_eq!(site.matrix, expected, "pin {pin}");
            assert_eq!(site.pin_number(), Some(pin));
        }
        assert_eq!(dev.iob_by_pin(1), None);
        assert_eq!(dev.iob_by_pin(11), None);
    }

    #[test]
    fn pin2_is_input_only() {
        let dev = Device::slg46620();
        let pin2 = dev.site(dev.iob_by_pin(2).unwrap());
        assert!(pin2.is_input_only());
        assert!(pin2.inputs.is_empty());
        assert_eq!(pin2.outputs, vec!["OUT".to_string()]);
        let pin3 = dev.site(dev.iob_by_pin(3).unwrap());
        assert!(!pin3.is_input_only());
    }

    #[test]
    fn iob_ports_follow_flavor() {
        let dev = Device::slg46620();
        let type_a = dev.site(dev.iob_by_pin(3).unwrap());
        assert_eq!(type_a.iob.unwrap().flavor, IobFlavor::TypeA);
        assert_eq!(type_a.inputs, vec!["IN".to_string(), "OE".to_string()]);
        let type_b = dev.site(dev.iob_by_pin(4).unwrap());
        assert_eq!(type_b.iob.unwrap().flavor, IobFlavor::TypeB);
        assert_eq!(type_b.inputs, vec!["IN".to_string()]);
    }

    #[test]
    fn counter_inventory() {
        let dev = Device::slg46620();
        let kinds: Vec<SiteKind> = (0..dev.counter_count())
            .map(|i| dev.site(dev.counter(i)).kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SiteKind::Count14Adv,
                SiteKind::Count14,
                SiteKind::Count8,
                SiteKind::Count8,
                SiteKind::Count8,
                SiteKind::Count14Adv,
                SiteKind::Count8Adv,
                SiteKind::Count8,
                SiteKind::Count8,
                SiteKind::Count8,
            ]
        );
        // Counter 5 sits on matrix 1
        assert_eq!(dev.site(dev.counter(5)).matrix, 1);
        assert_eq!(dev.site(dev.counter(2)).matrix, 0);
    }

    #[test]
    fn flipflop_set_reset_split() {
        let dev = Device::slg46620();
        let with_sr = (0..dev.flipflop_count())
            .filter(|&i| dev.site(dev.flipflop(i)).has_set_reset())
            .count();
        assert_eq!(with_sr, 6);
        assert!(dev.site(dev.flipflop(0)).has_set_reset());
        assert!(!dev.site(dev.flipflop(5)).has_set_reset());
    }

    #[test]
    fn power_rails_own_low_net_numbers() {
        let dev = Device::slg46620();
        let vss = dev.site(dev.vss().unwrap());
        let vdd = dev.site(dev.vdd().unwrap());
        assert_eq!(vss.output_base, 0);
        assert_eq!(vdd.output_base, 1);
        assert_eq!(vss.rail_value(), Some(false));
        assert_eq!(vdd.rail_value(), Some(true));
    }

    #[test]
    fn analog_sites_have_no_fabric_terminals() {
        let dev = Device::slg46620();
        for i in 0..dev.vref_count() {
            let site = dev.site(dev.vref(i));
            assert!(site.inputs.is_empty());
            assert!(site.outputs.is_empty());
        }
        let pga = dev.site(dev.pga().unwrap());
        assert!(pga.inputs.is_empty());
        let acmp = dev.site(dev.acmp(0));
        assert!(acmp.is_general_fabric_input("PWREN"));
        assert!(!acmp.is_general_fabric_input("VIN"));
    }

    #[test]
    fn construction_is_deterministic() {
        let first = serde_json::to_string(&Device::slg46620()).unwrap();
        let second = serde_json::to_string(&Device::slg46620()).unwrap();
        assert_eq!(first, second);
    }
}
