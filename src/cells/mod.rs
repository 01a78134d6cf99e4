//! Gate library: standard cells composed from transistor primitives.
//!
//! Thin composition layer over the public [`Netlist`] operations; the
//! solver knows nothing about it. Each constructor wires a static CMOS
//! cell out of transistor pairs and returns the externally relevant
//! nets. Inputs are fed by unifying them with a driving net (a switch
//! output or another cell's output) via [`Netlist::connect`].

use crate::circuit::{NetId, Netlist};

/// A CMOS inverter: one P-type and one N-type transistor sharing gate
/// and drain, sources tied to the rails.
#[derive(Debug, Clone, Copy)]
pub struct Not {
    /// Shared gate net
    pub input: NetId,
    /// Shared drain net
    pub output: NetId,
}

impl Not {
    /// Build an inverter. The label marks its output net in dumps.
    pub fn new(netlist: &mut Netlist, label: &str) -> Self {
        let p = netlist.add_pmos();
        let n = netlist.add_nmos();

        netlist.connect(p.drain, n.drain);
        netlist.set_label(p.drain, format!("{label} out"));

        netlist.connect(p.source, NetId::VDD);
        netlist.connect(n.source, NetId::GND);
        netlist.connect(p.gate, n.gate);

        Self {
            input: n.gate,
            output: n.drain,
        }
    }
}

/// A two-input CMOS NAND gate: two P-type pull-ups in parallel to Vdd,
/// two N-type pull-downs in series to Gnd, drains unified as the output.
#[derive(Debug, Clone, Copy)]
pub struct Nand {
    /// First input net
    pub input_a: NetId,
    /// Second input net
    pub input_b: NetId,
    /// Output net
    pub output: NetId,
}

impl Nand {
    /// Build a NAND gate. The label marks its output net in dumps.
    pub fn new(netlist: &mut Netlist, label: &str) -> Self {
        let p0 = netlist.add_pmos();
        let p1 = netlist.add_pmos();
        let n0 = netlist.add_nmos();
        let n1 = netlist.add_nmos();

        // Parallel pull-up network
        netlist.connect(p0.source, NetId::VDD);
        netlist.connect(p1.source, NetId::VDD);
        netlist.connect(p0.gate, n0.gate);
        netlist.connect(p1.gate, n1.gate);

        // Series pull-down network
        netlist.connect(n1.source, NetId::GND);
        netlist.connect(n0.source, n1.drain);

        netlist.connect(p0.drain, p1.drain);
        netlist.connect(n0.drain, p1.drain);
        netlist.set_label(p1.drain, format!("{label} out"));

        Self {
            input_a: n0.gate,
            input_b: n1.gate,
            output: p1.drain,
        }
    }
}
