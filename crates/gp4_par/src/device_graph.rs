//! Device-graph construction.
//!
//! Builds one node per physical site, with the primary label of the site's
//! own kind and alternate labels for every smaller kind that may legally be
//! mapped onto it. Routing candidates come in two flavors: the dense
//! general-fabric edges (complete bipartite between all outputs and all
//! inputs of distinct sites; physical routability across matrices is the
//! bitstream emitter's problem) and the sparse dedicated edges that bypass
//! the fabric on specific parts.

use gp4_device::{Device, IobFlavor, Part, SiteId};
use gp4_graph::{Graph, Label, LabelRegistry, NodeId};
use std::collections::BTreeMap;

/// The full GreenPAK4 label set, allocated once per compilation.
struct Labels {
    ibuf: Label,
    obuf: Label,
    iobuf: Label,
    lut2: Label,
    lut3: Label,
    lut4: Label,
    inv: Label,
    shreg: Label,
    vref: Label,
    acmp: Label,
    dac: Label,
    dff: Label,
    dffsr: Label,
    abuf: Label,
    bandgap: Label,
    lfosc: Label,
    pga: Label,
    por: Label,
    rcosc: Label,
    ringosc: Label,
    sysreset: Label,
    vdd: Label,
    vss: Label,
    count8: Label,
    count8_adv: Label,
    count14: Label,
    count14_adv: Label,
}

impl Labels {
    /// Allocates every canonical primitive label, then registers the
    /// primitive-name synonyms as aliases.
    fn allocate(registry: &mut LabelRegistry) -> Self {
        let labels = Self {
            ibuf: registry.allocate("GP_IBUF"),
            obuf: registry.allocate("GP_OBUF"),
            iobuf: registry.allocate("GP_IOBUF"),
            lut2: registry.allocate("GP_2LUT"),
            lut3: registry.allocate("GP_3LUT"),
            lut4: registry.allocate("GP_4LUT"),
            inv: registry.allocate("GP_INV"),
            shreg: registry.allocate("GP_SHREG"),
            vref: registry.allocate("GP_VREF"),
            acmp: registry.allocate("GP_ACMP"),
            dac: registry.allocate("GP_DAC"),
            dff: registry.allocate("GP_DFF"),
            dffsr: registry.allocate("GP_DFFSR"),
            abuf: registry.allocate("GP_ABUF"),
            bandgap: registry.allocate("GP_BANDGAP"),
            lfosc: registry.allocate("GP_LFOSC"),
            pga: registry.allocate("GP_PGA"),
            por: registry.allocate("GP_POR"),
            rcosc: registry.allocate("GP_RCOSC"),
            ringosc: registry.allocate("GP_RINGOSC"),
            sysreset: registry.allocate("GP_SYSRESET"),
            vdd: registry.allocate("GP_VDD"),
            vss: registry.allocate("GP_VSS"),
            count8: registry.allocate("GP_COUNT8"),
            count8_adv: registry.allocate("GP_COUNT8_ADV"),
            count14: registry.allocate("GP_COUNT14"),
            count14_adv: registry.allocate("GP_COUNT14_ADV"),
        };
        registry.alias("GP_DFFR", labels.dffsr);
        registry.alias("GP_DFFS", labels.dffsr);
        registry.alias("GP_OBUFT", labels.obuf);
        labels
    }
}

/// Nodes of interest for the dedicated-route tables, collected while the
/// nodes are created so the tables never have to chase back-references.
#[derive(Default)]
struct DeviceNodes {
    iob_by_pin: BTreeMap<u32, NodeId>,
    counters: Vec<NodeId>,
    vrefs: Vec<NodeId>,
    acmps: Vec<NodeId>,
    dacs: Vec<NodeId>,
    lfosc: Option<NodeId>,
    rcosc: Option<NodeId>,
    ringosc: Option<NodeId>,
    pga: Option<NodeId>,
    abuf: Option<NodeId>,
    sysreset: Option<NodeId>,
    vdd: Option<NodeId>,
    vss: Option<NodeId>,
}

/// Creates a node for one site and writes the back-reference.
fn make_node(
    graph: &mut Graph<SiteId>,
    device: &mut Device,
    site: SiteId,
    primary: Label,
) -> NodeId {
    let node = graph.add_node(primary, site);
    device.site_mut(site).par_node = Some(node);
    node
}

/// Builds the device graph for `device`, allocating the primitive labels
/// into `registry`.
///
/// Node order is fixed: IOBs in pin order, then LUT2/LUT3/LUT4, inverters,
/// shift registers, voltage references, comparators, DACs, flip-flops, the
/// single-instance hard IP, and finally the counters. The downstream
/// placer's tie-breaking depends on this order staying stable.
pub fn build_device_graph(device: &mut Device, registry: &mut LabelRegistry) -> Graph<SiteId> {
    let labels = Labels::allocate(registry);
    let mut graph = Graph::new();
    let mut nodes = DeviceNodes::default();

    // IOBs. Type A pads that can drive can be anything; type B pads cannot
    // be bidirectional; input-only pads are just inputs.
    for i in 0..device.iob_count() {
        let site = device.iob(i);
        let info = device.site(site).iob;
        let input_only = device.site(site).is_input_only();
        let node = if input_only {
            make_node(&mut graph, device, site, labels.ibuf)
        } else if matches!(info, Some(i) if i.flavor == IobFlavor::TypeA) {
            let node = make_node(&mut graph, device, site, labels.iobuf);
            graph.add_alternate(node, labels.obuf);
            graph.add_alternate(node, labels.ibuf);
            node
        } else {
            let node = make_node(&mut graph, device, site, labels.obuf);
            graph.add_alternate(node, labels.ibuf);
            node
        };
        if let Some(info) = info {
            nodes.iob_by_pin.insert(info.pin, node);
        }
    }

    // LUTs. A bigger LUT site can absorb any smaller LUT demand.
    for i in 0..device.lut2_count() {
        let site = device.lut2(i);
        make_node(&mut graph, device, site, labels.lut2);
    }
    for i in 0..device.lut3_count() {
        let site = device.lut3(i);
        let node = make_node(&mut graph, device, site, labels.lut3);
        graph.add_alternate(node, labels.lut2);
    }
    for i in 0..device.lut4_count() {
        let site = device.lut4(i);
        let node = make_node(&mut graph, device, site, labels.lut4);
        graph.add_alternate(node, labels.lut2);
        graph.add_alternate(node, labels.lut3);
    }

    for i in 0..device.inverter_count() {
        let site = device.inverter(i);
        make_node(&mut graph, device, site, labels.inv);
    }
    for i in 0..device.shreg_count() {
        let site = device.shreg(i);
        make_node(&mut graph, device, site, labels.shreg);
    }
    for i in 0..device.vref_count() {
        let site = device.vref(i);
        let node = make_node(&mut graph, device, site, labels.vref);
        nodes.vrefs.push(node);
    }
    for i in 0..device.acmp_count() {
        let site = device.acmp(i);
        let node = make_node(&mut graph, device, site, labels.acmp);
        nodes.acmps.push(node);
    }
    for i in 0..device.dac_count() {
        let site = device.dac(i);
        let node = make_node(&mut graph, device, site, labels.dac);
        nodes.dacs.push(node);
    }

    // Flip-flops. A plain DFF may be placed on a set/reset site.
    for i in 0..device.flipflop_count() {
        let site = device.flipflop(i);
        if device.site(site).has_set_reset() {
            let node = make_node(&mut graph, device, site, labels.dffsr);
            graph.add_alternate(node, labels.dff);
        } else {
            make_node(&mut graph, device, site, labels.dff);
        }
    }

    // Single-instance hard IP
    nodes.abuf = device
        .abuf()
        .map(|site| make_node(&mut graph, device, site, labels.abuf));
    if let Some(site) = device.bandgap() {
        make_node(&mut graph, device, site, labels.bandgap);
    }
    nodes.lfosc = device
        .lfosc()
        .map(|site| make_node(&mut graph, device, site, labels.lfosc));
    nodes.pga = device
        .pga()
        .map(|site| make_node(&mut graph, device, site, labels.pga));
    if let Some(site) = device.por() {
        make_node(&mut graph, device, site, labels.por);
    }
    nodes.rcosc = device
        .rcosc()
        .map(|site| make_node(&mut graph, device, site, labels.rcosc));
    nodes.ringosc = device
        .ringosc()
        .map(|site| make_node(&mut graph, device, site, labels.ringosc));
    nodes.sysreset = device
        .sysreset()
        .map(|site| make_node(&mut graph, device, site, labels.sysreset));
    nodes.vdd = device
        .vdd()
        .map(|site| make_node(&mut graph, device, site, labels.vdd));
    nodes.vss = device
        .vss()
        .map(|site| make_node(&mut graph, device, site, labels.vss));

    // Counters. A COUNT8 fits anywhere; a COUNT14 also fits the 14-bit FSM
    // site. A COUNT8_ADV never fits a COUNT14_ADV site: the two count up
    // differently.
    for i in 0..device.counter_count() {
        let site = device.counter(i);
        let depth = device.site(site).counter_depth();
        let fsm = device.site(site).has_fsm();
        let node = match (depth, fsm) {
            (Some(14), true) => {
                let node = make_node(&mut graph, device, site, labels.count14_adv);
                graph.add_alternate(node, labels.count8);
                graph.add_alternate(node, labels.count14);
                node
            }
            (Some(14), false) => {
                let node = make_node(&mut graph, device, site, labels.count14);
                graph.add_alternate(node, labels.count8);
                node
            }
            (Some(8), true) => {
                let node = make_node(&mut graph, device, site, labels.count8_adv);
                graph.add_alternate(node, labels.count8);
                node
            }
            _ => make_node(&mut graph, device, site, labels.count8),
        };
        nodes.counters.push(node);
    }

    add_fabric_edges(device, &mut graph);

    if device.part() == Part::Slg46620 {
        add_dedicated_edges(&mut graph, &nodes);
    }

    graph
}

/// Adds the O(n²) general-fabric edges: every output of every site to every
/// input of every *other* site. Whether a given edge is physically routable
/// (same matrix, cross-connection budget) is decided by the bitstream
/// emitter from the sites' `matrix` fields.
fn add_fabric_edges(device: &Device, graph: &mut Graph<SiteId>) {
    let entries: Vec<(NodeId, SiteId)> = graph.iter().map(|(id, n)| (id, *n.payload())).collect();
    for &(x, x_site) in &entries {
        for src_port in &device.site(x_site).outputs {
            for &(y, y_site) in &entries {
                // A site's output never feeds its own input through the fabric
                if x == y {
                    continue;
                }
                for in_port in &device.site(y_site).inputs {
                    graph.add_edge(x, src_port.as_str(), y, in_port.as_str());
                }
            }
        }
    }
}

/// Adds the SLG46620's dedicated routes: connections that bypass the general
/// fabric. The port names here are hard IP terminals and deliberately do not
/// all appear in the sites' fabric port lists.
fn add_dedicated_edges(graph: &mut Graph<SiteId>, nodes: &DeviceNodes) {
    let pin = |p: u32| nodes.iob_by_pin.get(&p).copied();

    // Clock inputs to counters
    // TODO: model the remaining silicon clock sources (matrix clock dividers)
    if let (Some(lfosc), Some(ringosc), Some(rcosc)) = (nodes.lfosc, nodes.ringosc, nodes.rcosc) {
        for &counter in &nodes.counters {
            graph.add_edge(lfosc, "CLKOUT", counter, "CLK");
            graph.add_edge(ringosc, "CLKOUT_PREDIV", counter, "CLK");
            graph.add_edge(rcosc, "CLKOUT_PREDIV", counter, "CLK");
        }
    }

    // System reset can be driven by ground or pin 2 only
    if let Some(sysreset) = nodes.sysreset {
        if let Some(pin2) = pin(2) {
            graph.add_edge(pin2, "OUT", sysreset, "RST");
        }
        if let Some(gnd) = nodes.vss {
            graph.add_edge(gnd, "OUT", sysreset, "RST");
        }
    }

    // Reference out: VREF0/1 share pin 19, VREF2/3 share pin 18
    for (vref_index, pin_number) in [(0, 19), (1, 19), (2, 18), (3, 18)] {
        if let (Some(&vref), Some(iob)) = (nodes.vrefs.get(vref_index), pin(pin_number)) {
            graph.add_edge(vref, "VOUT", iob, "IN");
        }
    }

    // Any reference can drive any comparator; the actual routing structure
    // is hidden here
    for &acmp in &nodes.acmps {
        for &vref in &nodes.vrefs {
            graph.add_edge(vref, "VOUT", acmp, "VREF");
        }
    }

    // Comparator analog inputs. Pin 6 feeds the analog buffer, whose output
    // fans out to the first five comparators alongside pin 6 and Vdd.
    if let (Some(abuf), Some(pin6)) = (nodes.abuf, pin(6)) {
        graph.add_edge(pin6, "OUT", abuf, "IN");
    }
    let acmp_pins: [&[u32]; 6] = [&[], &[12], &[13], &[15, 13], &[3, 15], &[4]];
    for (index, pins) in acmp_pins.iter().enumerate() {
        let Some(&acmp) = nodes.acmps.get(index) else {
            continue;
        };
        for &p in *pins {
            if let Some(iob) = pin(p) {
                graph.add_edge(iob, "OUT", acmp, "VIN");
            }
        }
        if index == 1 {
            if let Some(pga) = nodes.pga {
                graph.add_edge(pga, "VOUT", acmp, "VIN");
            }
        }
    }
    for index in 0..5 {
        let Some(&acmp) = nodes.acmps.get(index) else {
            continue;
        };
        if let Some(pin6) = pin(6) {
            graph.add_edge(pin6, "OUT", acmp, "VIN");
        }
        if let Some(vdd) = nodes.vdd {
            graph.add_edge(vdd, "OUT", acmp, "VIN");
        }
        if let Some(abuf) = nodes.abuf {
            graph.add_edge(abuf, "OUT", acmp, "VIN");
        }
    }

    // PGA inputs
    if let Some(pga) = nodes.pga {
        if let Some(vdd) = nodes.vdd {
            graph.add_edge(vdd, "OUT", pga, "VIN_P");
        }
        if let Some(pin8) = pin(8) {
            graph.add_edge(pin8, "OUT", pga, "VIN_P");
        }
        if let Some(pin9) = pin(9) {
            graph.add_edge(pin9, "OUT", pga, "VIN_N");
        }
        if let Some(gnd) = nodes.vss {
            graph.add_edge(gnd, "OUT", pga, "VIN_N");
        }
        if let Some(pin16) = pin(16) {
            graph.add_edge(pin16, "OUT", pga, "VIN_SEL");
        }
        if let Some(vdd) = nodes.vdd {
            graph.add_edge(vdd, "OUT", pga, "VIN_SEL");
        }

        // PGA to its dedicated output pin
        if let Some(pin7) = pin(7) {
            graph.add_edge(pga, "VOUT", pin7, "IN");
        }
    }

    // DAC data bits are static register configuration: each bit can be tied
    // high or low
    for &dac in &nodes.dacs {
        if let Some(vdd) = nodes.vdd {
            for bit in 0..8 {
                graph.add_edge(vdd, "OUT", dac, format!("DIN[{bit}]"));
            }
        }
        if let Some(gnd) = nodes.vss {
            for bit in 0..8 {
                graph.add_edge(gnd, "OUT", dac, format!("DIN[{bit}]"));
            }
        }
    }
}
