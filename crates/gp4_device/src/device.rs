//! The device root: every site of one GreenPAK4 part, grouped by kind.

use crate::ids::SiteId;
use crate::site::{Site, SiteKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The GreenPAK4 family members the toolchain knows about.
///
/// Only the SLG46620 has a full descriptor today; the others reserve their
/// part IDs so netlists can state a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    /// SLG46140V: single-matrix part.
    Slg46140,
    /// SLG46620V: the flagship 20-pin, dual-matrix part.
    Slg46620,
    /// SLG46621V: SLG46620 die with a dedicated Vdd2 pin.
    Slg46621,
}

impl Part {
    /// Returns the canonical part name.
    pub fn name(self) -> &'static str {
        match self {
            Part::Slg46140 => "SLG46140V",
            Part::Slg46620 => "SLG46620V",
            Part::Slg46621 => "SLG46621V",
        }
    }
}

/// One GreenPAK4 device: an ordered site arena plus per-kind registries.
///
/// Site insertion order is fixed by the descriptor and observable downstream;
/// all per-kind accessors return sites in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    part: Part,
    sites: Vec<Site>,
    iobs: Vec<SiteId>,
    iob_by_pin: BTreeMap<u32, SiteId>,
    lut2s: Vec<SiteId>,
    lut3s: Vec<SiteId>,
    lut4s: Vec<SiteId>,
    /// All flip-flops, set/reset capable or not, in one index space.
    flipflops: Vec<SiteId>,
    /// All counters, in one index space regardless of depth or FSM.
    counters: Vec<SiteId>,
    shregs: Vec<SiteId>,
    inverters: Vec<SiteId>,
    vrefs: Vec<SiteId>,
    acmps: Vec<SiteId>,
    dacs: Vec<SiteId>,
    abuf: Option<SiteId>,
    bandgap: Option<SiteId>,
    lfosc: Option<SiteId>,
    pga: Option<SiteId>,
    por: Option<SiteId>,
    rcosc: Option<SiteId>,
    ringosc: Option<SiteId>,
    sysreset: Option<SiteId>,
    vdd: Option<SiteId>,
    vss: Option<SiteId>,
}

impl Device {
    /// Creates an empty device for the given part.
    pub fn new(part: Part) -> Self {
        Self {
            part,
            sites: Vec::new(),
            iobs: Vec::new(),
            iob_by_pin: BTreeMap::new(),
            lut2s: Vec::new(),
            lut3s: Vec::new(),
            lut4s: Vec::new(),
            flipflops: Vec::new(),
            counters: Vec::new(),
            shregs: Vec::new(),
            inverters: Vec::new(),
            vrefs: Vec::new(),
            acmps: Vec::new(),
            dacs: Vec::new(),
            abuf: None,
            bandgap: None,
            lfosc: None,
            pga: None,
            por: None,
            rcosc: None,
            ringosc: None,
            sysreset: None,
            vdd: None,
            vss: None,
        }
    }

    /// Returns the device part.
    pub fn part(&self) -> Part {
        self.part
    }

    /// Appends a site, assigns its ID and within-kind index, and registers
    /// it with the matching per-kind accessor group.
    pub fn add_site(&mut self, mut site: Site) -> SiteId {
        let id = SiteId::from_raw(self.sites.len() as u32);
        site.id = id;
        site.index = match site.kind {
            SiteKind::Iob => self.iobs.len() as u32,
            SiteKind::Lut2 => self.lut2s.len() as u32,
            SiteKind::Lut3 => self.lut3s.len() as u32,
            SiteKind::Lut4 => self.lut4s.len() as u32,
            SiteKind::Dff | SiteKind::Dffsr => self.flipflops.len() as u32,
            SiteKind::Count8 | SiteKind::Count8Adv | SiteKind::Count14 | SiteKind::Count14Adv => {
                self.counters.len() as u32
            }
            SiteKind::Shreg => self.shregs.len() as u32,
            SiteKind::Inv => self.inverters.len() as u32,
            SiteKind::Vref => self.vrefs.len() as u32,
            SiteKind::Acmp => self.acmps.len() as u32,
            SiteKind::Dac => self.dacs.len() as u32,
            _ => 0,
        };
        match site.kind {
            SiteKind::Iob => {
                if let Some(info) = site.iob {
                    self.iob_by_pin.insert(info.pin, id);
                }
                self.iobs.push(id);
            }
            SiteKind::Lut2 => self.lut2s.push(id),
            SiteKind::Lut3 => self.lut3s.push(id),
            SiteKind::Lut4 => self.lut4s.push(id),
            SiteKind::Dff | SiteKind::Dffsr => self.flipflops.push(id),
            SiteKind::Count8 | SiteKind::Count8Adv | SiteKind::Count14 | SiteKind::Count14Adv => {
                self.counters.push(id)
            }
            SiteKind::Shreg => self.shregs.push(id),
            SiteKind::Inv => self.inverters.push(id),
            SiteKind::Vref => self.vrefs.push(id),
            SiteKind::Acmp => self.acmps.push(id),
            SiteKind::Dac => self.dacs.push(id),
            SiteKind::Abuf => self.abuf = Some(id),
            SiteKind::Bandgap => self.bandgap = Some(id),
            SiteKind::Lfosc => self.lfosc = Some(id),
            SiteKind::Pga => self.pga = Some(id),
            SiteKind::Por => self.por = Some(id),
            SiteKind::Rcosc => self.rcosc = Some(id),
            SiteKind::Ringosc => self.ringosc = Some(id),
            SiteKind::Sysreset => self.sysreset = Some(id),
            SiteKind::Vdd => self.vdd = Some(id),
            SiteKind::Vss => self.vss = Some(id),
        }
        self.sites.push(site);
        id
    }

    /// Returns the site with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn site(&self, id: SiteId) -> &Site {
        &self.sites[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the site with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn site_mut(&mut self, id: SiteId) -> &mut Site {
        &mut self.sites[id.as_raw() as usize]
    }

    /// Iterates over all sites in insertion order.
    pub fn sites(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    /// Returns the total number of sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Returns the number of I/O blocks.
    pub fn iob_count(&self) -> usize {
        self.iobs.len()
    }

    /// Returns the I/O block at the given index (pin order).
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn iob(&self, index: usize) -> SiteId {
        self.iobs[index]
    }

    /// Looks up an I/O block by package pin number.
    pub fn iob_by_pin(&self, pin: u32) -> Option<SiteId> {
        self.iob_by_pin.get(&pin).copied()
    }

    /// Returns the number of 2-input LUTs.
    pub fn lut2_count(&self) -> usize {
        self.lut2s.len()
    }

    /// Returns the 2-input LUT at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn lut2(&self, index: usize) -> SiteId {
        self.lut2s[index]
    }

    /// Returns the number of 3-input LUTs.
    pub fn lut3_count(&self) -> usize {
        self.lut3s.len()
    }

    /// Returns the 3-input LUT at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn lut3(&self, index: usize) -> SiteId {
        self.lut3s[index]
    }

    /// Returns the number of 4-input LUTs.
    pub fn lut4_count(&self) -> usize {
        self.lut4s.len()
    }

    /// Returns the 4-input LUT at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn lut4(&self, index: usize) -> SiteId {
        self.lut4s[index]
    }

    /// Returns the total number of flip-flops of either capability.
    pub fn flipflop_count(&self) -> usize {
        self.flipflops.len()
    }

    /// Returns the flip-flop at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn flipflop(&self, index: usize) -> SiteId {
        self.flipflops[index]
    }

    /// Returns the total number of counters of any depth.
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Returns the counter at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn counter(&self, index: usize) -> SiteId {
        self.counters[index]
    }

    /// Returns the number of shift registers.
    pub fn shreg_count(&self) -> usize {
        self.shregs.len()
    }

    /// Returns the shift register at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn shreg(&self, index: usize) -> SiteId {
        self.shregs[index]
    }

    /// Returns the number of dedicated inverters.
    pub fn inverter_count(&self) -> usize {
        self.inverters.len()
    }

    /// Returns the inverter at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn inverter(&self, index: usize) -> SiteId {
        self.inverters[index]
    }

    /// Returns the number of voltage references.
    pub fn vref_count(&self) -> usize {
        self.vrefs.len()
    }

    /// Returns the voltage reference at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn vref(&self, index: usize) -> SiteId {
        self.vrefs[index]
    }

    /// Returns the number of analog comparators.
    pub fn acmp_count(&self) -> usize {
        self.acmps.len()
    }

    /// Returns the analog comparator at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn acmp(&self, index: usize) -> SiteId {
        self.acmps[index]
    }

    /// Returns the number of DACs.
    pub fn dac_count(&self) -> usize {
        self.dacs.len()
    }

    /// Returns the DAC at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn dac(&self, index: usize) -> SiteId {
        self.dacs[index]
    }

    /// Returns the analog buffer, if the part has one.
    pub fn abuf(&self) -> Option<SiteId> {
        self.abuf
    }

    /// Returns the bandgap reference, if the part has one.
    pub fn bandgap(&self) -> Option<SiteId> {
        self.bandgap
    }

    /// Returns the low-frequency oscillator, if the part has one.
    pub fn lfosc(&self) -> Option<SiteId> {
        self.lfosc
    }

    /// Returns the programmable-gain amplifier, if the part has one.
    pub fn pga(&self) -> Option<SiteId> {
        self.pga
    }

    /// Returns the power-on-reset block, if the part has one.
    pub fn por(&self) -> Option<SiteId> {
        self.por
    }

    /// Returns the RC oscillator, if the part has one.
    pub fn rcosc(&self) -> Option<SiteId> {
        self.rcosc
    }

    /// Returns the ring oscillator, if the part has one.
    pub fn ringosc(&self) -> Option<SiteId> {
        self.ringosc
    }

    /// Returns the system reset block, if the part has one.
    pub fn sysreset(&self) -> Option<SiteId> {
        self.sysreset
    }

    /// Returns the VDD power rail, if the part has one.
    pub fn vdd(&self) -> Option<SiteId> {
        self.vdd
    }

    /// Returns the VSS power rail, if the part has one.
    pub fn vss(&self) -> Option<SiteId> {
        self.vss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{IobFlavor, IobInfo};

    fn bare_site(kind: SiteKind, matrix: u8) -> Site {
        Site {
            id: SiteId::from_raw(0),
            kind,
            index: 0,
            matrix,
            input_base: 0,
            output_base: 0,
            config_base: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
            iob: None,
            par_node: None,
        }
    }

    #[test]
    fn empty_device() {
        let dev = Device::new(Part::Slg46620);
        assert_eq!(dev.part(), Part::Slg46620);
        assert_eq!(dev.site_count(), 0);
        assert_eq!(dev.counter_count(), 0);
        assert!(dev.lfosc().is_none());
    }

    #[test]
    fn part_names() {
        assert_eq!(Part::Slg46620.name(), "SLG46620V");
        assert_eq!(Part::Slg46621.name(), "SLG46621V");
        assert_eq!(Part::Slg46140.name(), "SLG46140V");
    }

    #[test]
    fn within_kind_indices_are_assigned() {
        let mut dev = Device::new(Part::Slg46620);
        let a = dev.add_site(bare_site(SiteKind::Lut2, 0));
        let b = dev.add_site(bare_site(SiteKind::Lut3, 0));
        let c = dev.add_site(bare_site(SiteKind::Lut2, 1));
        assert_eq!(dev.site(a).index, 0);
        assert_eq!(dev.site(b).index, 0);
        assert_eq!(dev.site(c).index, 1);
        assert_eq!(dev.lut2_count(), 2);
        assert_eq!(dev.lut2(1), c);
    }

    #[test]
    fn flipflops_share_one_index_space() {
        let mut dev = Device::new(Part::Slg46620);
        let sr = dev.add_site(bare_site(SiteKind::Dffsr, 0));
        let plain = dev.add_site(bare_site(SiteKind::Dff, 0));
        assert_eq!(dev.flipflop_count(), 2);
        assert_eq!(dev.flipflop(0), sr);
        assert_eq!(dev.flipflop(1), plain);
        assert_eq!(dev.site(plain).index, 1);
    }

    #[test]
    fn counters_share_one_index_space() {
        let mut dev = Device::new(Part::Slg46620);
        dev.add_site(bare_site(SiteKind::Count14Adv, 0));
        dev.add_site(bare_site(SiteKind::Count8, 0));
        dev.add_site(bare_site(SiteKind::Count8Adv, 1));
        assert_eq!(dev.counter_count(), 3);
        assert_eq!(dev.site(dev.counter(2)).index, 2);
    }

    #[test]
    fn iob_pin_lookup() {
        let mut dev = Device::new(Part::Slg46620);
        let mut site = bare_site(SiteKind::Iob, 0);
        site.iob = Some(IobInfo {
            pin: 6,
            flavor: IobFlavor::TypeB,
            input_only: false,
        });
        let id = dev.add_site(site);
        assert_eq!(dev.iob_by_pin(6), Some(id));
        assert_eq!(dev.iob_by_pin(7), None);
        assert_eq!(dev.iob(0), id);
    }

    #[test]
    fn singletons_registered() {
        let mut dev = Device::new(Part::Slg46620);
        let lfosc = dev.add_site(bare_site(SiteKind::Lfosc, 1));
        let vdd = dev.add_site(bare_site(SiteKind::Vdd, 0));
        assert_eq!(dev.lfosc(), Some(lfosc));
        assert_eq!(dev.vdd(), Some(vdd));
        assert_eq!(dev.rcosc(), None);
    }

    #[test]
    fn site_mut_writes_back_reference() {
        let mut dev = Device::new(Part::Slg46620);
        let id = dev.add_site(bare_site(SiteKind::Inv, 0));
        dev.site_mut(id).par_node = Some(gp4_graph::NodeId::from_raw(9));
        assert_eq!(
            dev.site(id).par_node,
            Some(gp4_graph::NodeId::from_raw(9))
        );
    }
}
