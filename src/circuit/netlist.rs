//! Netlist structure: nets, connectivity, devices, and drive sources.

use std::collections::HashMap;

use super::types::{NetId, Polarity, SwitchId};

/// An abstract MOS transistor: a conditional connector between its source
/// and drain nets, gated by the level of a third net.
///
/// A transistor only ever pulls its drain toward one rail (LOW for N-type,
/// HIGH for P-type) and does nothing while its gate or source level is
/// unknown. Conduction is evaluated during resolution, never at
/// construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transistor {
    /// Gate net (conditioning input)
    pub gate: NetId,
    /// Source net (level to propagate)
    pub source: NetId,
    /// Drain net (output side)
    pub drain: NetId,
}

/// An external binary driver: forces its output net HIGH when the control
/// bit is on, LOW otherwise. The control bit is the only part of a
/// topology that may change between simulation steps.
#[derive(Debug, Clone)]
pub struct Switch {
    /// Current control bit
    pub on: bool,
    /// Output net, fixed at construction
    pub out: NetId,
}

/// A complete circuit topology ready for simulation.
///
/// Net connectivity is a union-find forest over a flat parent-index
/// arena: `parent[i]` points toward net `i`'s representative, and a net
/// whose parent is itself is a canonical root. Merged nets are never
/// split. Apart from switch control bits, the netlist is immutable once
/// construction is done.
#[derive(Debug)]
pub struct Netlist {
    /// Union-find parent links, indexed by net id
    parent: Vec<NetId>,

    /// Debug labels for nets. Not semantically load-bearing; only the
    /// debug dumps read them.
    labels: HashMap<NetId, String>,

    /// All N-type transistors in the circuit
    pub(crate) nmos: Vec<Transistor>,

    /// All P-type transistors in the circuit
    pub(crate) pmos: Vec<Transistor>,

    /// All switches, indexed by [`SwitchId`]
    pub(crate) switches: Vec<Switch>,
}

impl Default for Netlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Netlist {
    /// Create an empty netlist with the two reserved rail nets.
    pub fn new() -> Self {
        let mut netlist = Self {
            parent: Vec::new(),
            labels: HashMap::new(),
            nmos: Vec::new(),
            pmos: Vec::new(),
            switches: Vec::new(),
        };
        let vdd = netlist.node_labeled("VDD");
        let gnd = netlist.node_labeled("GND");
        debug_assert_eq!(vdd, NetId::VDD);
        debug_assert_eq!(gnd, NetId::GND);
        netlist
    }

    /// Allocate a fresh net, initially its own union-find root.
    pub fn node(&mut self) -> NetId {
        let id = NetId(self.parent.len());
        self.parent.push(id);
        id
    }

    /// Allocate a fresh net with a debug label.
    pub fn node_labeled(&mut self, label: impl Into<String>) -> NetId {
        let id = self.node();
        self.labels.insert(id, label.into());
        id
    }

    /// Attach a debug label to an existing net.
    pub fn set_label(&mut self, net: NetId, label: impl Into<String>) {
        self.labels.insert(net, label.into());
    }

    /// Get a net's debug label, if it has one.
    pub fn label(&self, net: NetId) -> Option<&str> {
        self.labels.get(&net).map(String::as_str)
    }

    /// Number of nets allocated so far (rails included).
    pub fn num_nets(&self) -> usize {
        self.parent.len()
    }

    /// Canonical representative of `net`'s equivalence class.
    ///
    /// Follows parent links until a self-referencing net is reached.
    /// Deterministic for a fixed forest state.
    pub fn root(&self, net: NetId) -> NetId {
        let mut i = net;
        while self.parent[i.0] != i {
            i = self.parent[i.0];
        }
        i
    }

    /// Electrically unify two nets (an ideal zero-resistance wire).
    ///
    /// Idempotent if the nets already share a root. Never fails: a
    /// contradiction between unified drivers only surfaces as a
    /// [`VoltageConflict`](crate::SimError::VoltageConflict) when
    /// voltages are resolved.
    pub fn connect(&mut self, from: NetId, to: NetId) {
        let from_root = self.root(from);
        let to_root = self.root(to);
        self.parent[from_root.0] = to_root;
    }

    /// Register an N-type transistor with three fresh terminal nets.
    pub fn add_nmos(&mut self) -> Transistor {
        let t = self.fresh_transistor();
        self.nmos.push(t);
        t
    }

    /// Register a P-type transistor with three fresh terminal nets.
    pub fn add_pmos(&mut self) -> Transistor {
        let t = self.fresh_transistor();
        self.pmos.push(t);
        t
    }

    fn fresh_transistor(&mut self) -> Transistor {
        let gate = self.node();
        let source = self.node();
        let drain = self.node();
        Transistor { gate, source, drain }
    }

    /// Register a switch driving a fresh output net, initially on.
    pub fn add_switch(&mut self, label: impl Into<String>) -> SwitchId {
        let out = self.node_labeled(label);
        let id = SwitchId(self.switches.len());
        self.switches.push(Switch { on: true, out });
        id
    }

    /// Flip a switch's control bit. Takes effect on the next step.
    pub fn set_switch(&mut self, id: SwitchId, on: bool) {
        self.switches[id.0].on = on;
    }

    /// Read a switch's output net.
    pub fn switch_out(&self, id: SwitchId) -> NetId {
        self.switches[id.0].out
    }

    /// Direct parent link of a net, for the raw state dump.
    pub(crate) fn parent(&self, net: NetId) -> NetId {
        self.parent[net.0]
    }

    /// Iterate over all labeled nets in ascending id order.
    pub(crate) fn labeled_nets(&self) -> impl Iterator<Item = (NetId, &str)> {
        let mut nets: Vec<_> = self
            .labels
            .iter()
            .map(|(&id, label)| (id, label.as_str()))
            .collect();
        nets.sort_by_key(|&(id, _)| id);
        nets.into_iter()
    }

    /// Count of transistors of the given polarity.
    pub fn device_count(&self, polarity: Polarity) -> usize {
        match polarity {
            Polarity::Nmos => self.nmos.len(),
            Polarity::Pmos => self.pmos.len(),
        }
    }
}
