//! Main simulator interface.

use std::collections::HashMap;
use std::fmt::Write;
use std::mem;

use crate::circuit::{Level, NetId, Netlist, SwitchId};
use crate::error::{Result, SimError};

use super::MAX_RELAX_PASSES;

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Ceiling on relaxation passes per phase.
    pub max_passes: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_passes: MAX_RELAX_PASSES,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relaxation pass ceiling.
    ///
    /// Raising it lets levels settle through longer series-transistor
    /// chains in one step; the stop-as-soon-as-nothing-changes check is
    /// unaffected, so well-behaved circuits never pay for a higher
    /// ceiling.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// The switch-level circuit simulator.
///
/// Owns the per-step voltage assignment plus the previous step's
/// resolved snapshot (the fallback source for floating gate signals).
/// The topology itself is borrowed per call, so one `Simulator` follows
/// one circuit across steps while the caller keeps flipping switches,
/// and independent simulators never share state.
#[derive(Debug)]
pub struct Simulator {
    /// This step's voltage assignment, keyed by canonical net root
    assignment: HashMap<NetId, Level>,
    /// Previous step's assignment, read only by the fallback phase
    prev: HashMap<NetId, Level>,
    /// Relaxation pass ceiling
    max_passes: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create a new simulator with default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a new simulator with custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            assignment: HashMap::new(),
            prev: HashMap::new(),
            max_passes: config.max_passes,
        }
    }

    /// Resolve one simulation step against the given topology.
    ///
    /// On success the full per-root voltage mapping is available through
    /// [`level`](Self::level) and [`assignment`](Self::assignment). Nets
    /// with no driving path stay unassigned; that is a valid outcome.
    /// Two drivers forcing different levels onto one unified net fail
    /// the step with [`SimError::VoltageConflict`]; the simulator then
    /// rolls back to its state before the attempt, so queries never
    /// observe the failed step's partial writes and a later step still
    /// falls back to the last completed step's levels.
    ///
    /// Series chains longer than the configured pass ceiling may not
    /// fully settle within one step (see
    /// [`MAX_RELAX_PASSES`](super::MAX_RELAX_PASSES)).
    pub fn step(&mut self, netlist: &Netlist) -> Result<()> {
        let last = mem::replace(&mut self.prev, mem::take(&mut self.assignment));
        match self.resolve(netlist) {
            Ok(()) => Ok(()),
            Err(err) => {
                // Roll back both maps; the failed step never happened.
                self.assignment = mem::replace(&mut self.prev, last);
                Err(err)
            }
        }
    }

    /// Resolve the current step into `self.assignment`.
    fn resolve(&mut self, netlist: &Netlist) -> Result<()> {
        // Rails first; the fresh map makes these writes conflict-free.
        self.assign(netlist, NetId::VDD, Level::High)?;
        self.assign(netlist, NetId::GND, Level::Low)?;

        for switch in &netlist.switches {
            let level = if switch.on { Level::High } else { Level::Low };
            self.assign(netlist, switch.out, level)?;
        }

        self.relax(netlist, false)?;
        self.relax(netlist, true)
    }

    /// Pass-bounded relaxation scan over every transistor.
    ///
    /// With `use_prev_gates` set, only devices whose gate is unresolved
    /// this step participate, reading their gate level from the previous
    /// step's snapshot; source, drain, and conflict checks always use
    /// the current assignment.
    fn relax(&mut self, netlist: &Netlist, use_prev_gates: bool) -> Result<()> {
        for _ in 0..self.max_passes {
            let mut updated = false;
            for t in &netlist.nmos {
                if self.gate_level(netlist, t.gate, use_prev_gates) == Some(Level::High)
                    && self.level(netlist, t.source) == Some(Level::Low)
                {
                    updated |= self.assign(netlist, t.drain, Level::Low)?;
                }
            }
            for t in &netlist.pmos {
                if self.gate_level(netlist, t.gate, use_prev_gates) == Some(Level::Low)
                    && self.level(netlist, t.source) == Some(Level::High)
                {
                    updated |= self.assign(netlist, t.drain, Level::High)?;
                }
            }
            if !updated {
                break;
            }
        }
        Ok(())
    }

    /// Gate level as seen by the current relaxation phase.
    fn gate_level(&self, netlist: &Netlist, gate: NetId, use_prev: bool) -> Option<Level> {
        let root = netlist.root(gate);
        let current = self.assignment.get(&root).copied();
        if use_prev {
            // Fallback phase: a gate resolved this step was already
            // handled by the primary phase.
            match current {
                Some(_) => None,
                None => self.prev.get(&root).copied(),
            }
        } else {
            current
        }
    }

    /// Single write path for every level assignment.
    ///
    /// Returns whether the root was newly constrained; assigning the
    /// level it already holds is a no-op, a different level is a fatal
    /// conflict.
    fn assign(&mut self, netlist: &Netlist, net: NetId, level: Level) -> Result<bool> {
        let root = netlist.root(net);
        match self.assignment.get(&root) {
            None => {
                self.assignment.insert(root, level);
                Ok(true)
            }
            Some(&existing) if existing == level => Ok(false),
            Some(&existing) => Err(SimError::conflict(root, existing, level)),
        }
    }

    /// Resolved level of a net this step, or `None` if it floats.
    pub fn level(&self, netlist: &Netlist, net: NetId) -> Option<Level> {
        self.assignment.get(&netlist.root(net)).copied()
    }

    /// The full per-root voltage mapping from the last completed step.
    pub fn assignment(&self) -> &HashMap<NetId, Level> {
        &self.assignment
    }

    /// Render every labeled net as `root / level / label`, ascending by
    /// net id. Unresolved nets show `?`. Format is advisory, for
    /// diagnostics only.
    pub fn dump(&self, netlist: &Netlist) -> String {
        let mut out = String::new();
        for (net, label) in netlist.labeled_nets() {
            let vol = match self.level(netlist, net) {
                Some(level) => level.symbol(),
                None => '?',
            };
            let _ = writeln!(
                out,
                "root: {}  vol: {}  name: {}",
                netlist.root(net),
                vol,
                label
            );
        }
        out
    }

    /// Render the raw solver state: every resolved root, the whole
    /// union-find parent arena (ascending by net id), and each switch's
    /// control state.
    pub fn dump_state(&self, netlist: &Netlist) -> String {
        let mut out = String::new();
        let mut roots: Vec<_> = self.assignment.iter().collect();
        roots.sort_by_key(|&(&root, _)| root);
        for (root, level) in roots {
            let _ = writeln!(out, "root: {}  vol: {}", root, level.symbol());
        }
        for id in 0..netlist.num_nets() {
            let net = NetId(id);
            let _ = writeln!(out, "parent[{}] = {}", net, netlist.parent(net));
        }
        for (i, switch) in netlist.switches.iter().enumerate() {
            let state = if switch.on { "on" } else { "off" };
            let _ = writeln!(out, "{}: {}  out: {}", SwitchId(i), state, switch.out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rails_forced_every_step() {
        let netlist = Netlist::new();
        let mut sim = Simulator::new();
        for _ in 0..3 {
            sim.step(&netlist).unwrap();
            assert_eq!(sim.level(&netlist, NetId::VDD), Some(Level::High));
            assert_eq!(sim.level(&netlist, NetId::GND), Some(Level::Low));
        }
    }

    #[test]
    fn test_switch_forces_output() {
        let mut netlist = Netlist::new();
        let sw = netlist.add_switch("SW0");
        let out = netlist.switch_out(sw);
        let mut sim = Simulator::new();

        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, out), Some(Level::High));

        netlist.set_switch(sw, false);
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, out), Some(Level::Low));
    }

    #[test]
    fn test_floating_net_reports_unresolved() {
        let mut netlist = Netlist::new();
        let lonely = netlist.node();
        // A transistor with no wiring to any driven net stays dark too
        let t = netlist.add_nmos();
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, lonely), None);
        assert_eq!(sim.level(&netlist, t.gate), None);
        assert_eq!(sim.level(&netlist, t.drain), None);
    }

    #[test]
    fn test_conflict_on_opposing_switches() {
        let mut netlist = Netlist::new();
        let sw0 = netlist.add_switch("SW0");
        let sw1 = netlist.add_switch("SW1");
        let out0 = netlist.switch_out(sw0);
        netlist.connect(out0, netlist.switch_out(sw1));
        netlist.set_switch(sw1, false);

        let mut sim = Simulator::new();
        let err = sim.step(&netlist).unwrap_err();
        assert_eq!(
            err,
            SimError::conflict(netlist.root(out0), Level::High, Level::Low)
        );
    }

    #[test]
    fn test_conflict_against_rail() {
        let mut netlist = Netlist::new();
        let sw = netlist.add_switch("SW0");
        netlist.set_switch(sw, false);
        netlist.connect(netlist.switch_out(sw), NetId::VDD);

        let mut sim = Simulator::new();
        let err = sim.step(&netlist).unwrap_err();
        assert!(matches!(
            err,
            SimError::VoltageConflict {
                existing: Level::High,
                attempted: Level::Low,
                ..
            }
        ));
    }

    #[test]
    fn test_failed_step_rolls_back_to_last_completed() {
        let mut netlist = Netlist::new();
        let sw0 = netlist.add_switch("SW0");
        let sw1 = netlist.add_switch("SW1");
        let shared = netlist.switch_out(sw0);
        netlist.connect(shared, netlist.switch_out(sw1));
        // Resolved by relaxation, so the completed step holds a write
        // the failed step never reaches
        let t = netlist.add_nmos();
        netlist.connect(t.gate, shared);
        netlist.connect(t.source, NetId::GND);

        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, t.drain), Some(Level::Low));
        let resolved = sim.assignment().clone();

        // Disagreeing switches fail the next step while drives are
        // being forced; queries must keep reporting the completed step.
        netlist.set_switch(sw1, false);
        sim.step(&netlist).unwrap_err();
        assert_eq!(sim.assignment(), &resolved);
        assert_eq!(sim.level(&netlist, t.drain), Some(Level::Low));

        // With the short removed the simulator steps on normally
        netlist.set_switch(sw1, true);
        sim.step(&netlist).unwrap();
        assert_eq!(sim.assignment(), &resolved);
    }

    #[test]
    fn test_failed_first_step_reports_nothing() {
        let mut netlist = Netlist::new();
        let sw0 = netlist.add_switch("SW0");
        let sw1 = netlist.add_switch("SW1");
        let out = netlist.switch_out(sw0);
        netlist.connect(out, netlist.switch_out(sw1));
        netlist.set_switch(sw1, false);

        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap_err();
        assert_eq!(sim.level(&netlist, out), None);
        assert!(sim.assignment().is_empty());
    }

    #[test]
    fn test_nmos_pulls_drain_low() {
        let mut netlist = Netlist::new();
        let t = netlist.add_nmos();
        netlist.connect(t.gate, NetId::VDD);
        netlist.connect(t.source, NetId::GND);
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, t.drain), Some(Level::Low));
    }

    #[test]
    fn test_pmos_pulls_drain_high() {
        let mut netlist = Netlist::new();
        let t = netlist.add_pmos();
        netlist.connect(t.gate, NetId::GND);
        netlist.connect(t.source, NetId::VDD);
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, t.drain), Some(Level::High));
    }

    #[test]
    fn test_disabled_gate_does_not_conduct() {
        let mut netlist = Netlist::new();
        let t = netlist.add_nmos();
        netlist.connect(t.gate, NetId::GND); // wrong polarity for N-type
        netlist.connect(t.source, NetId::GND);
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, t.drain), None);
    }

    #[test]
    fn test_repeated_steps_are_idempotent() {
        let mut netlist = Netlist::new();
        let sw = netlist.add_switch("SW0");
        let t = netlist.add_nmos();
        netlist.connect(t.gate, netlist.switch_out(sw));
        netlist.connect(t.source, NetId::GND);

        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        let first = sim.assignment().clone();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.assignment(), &first);
    }

    /// Build `len` N-type pass transistors in worst-case scan order: the
    /// chain head is inserted last, so every pass resolves exactly one
    /// more link. Returns the chain's final drain.
    fn reverse_series_chain(netlist: &mut Netlist, len: usize) -> NetId {
        let devices: Vec<_> = (0..len).map(|_| netlist.add_nmos()).collect();
        for t in &devices {
            netlist.connect(t.gate, NetId::VDD);
        }
        let head = devices[len - 1];
        netlist.connect(head.source, NetId::GND);
        for pair in devices.windows(2) {
            netlist.connect(pair[0].source, pair[1].drain);
        }
        devices[0].drain
    }

    #[test]
    fn test_chain_of_ten_settles_in_one_step() {
        let mut netlist = Netlist::new();
        let tail = reverse_series_chain(&mut netlist, 10);
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, tail), Some(Level::Low));
    }

    #[test]
    fn test_chain_beyond_pass_ceiling_left_unresolved() {
        // Out of the correctness contract, but pins the pass ceiling and
        // the stop-early behavior.
        let mut netlist = Netlist::new();
        let tail = reverse_series_chain(&mut netlist, 11);
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, tail), None);

        // A raised ceiling settles the same chain
        let mut sim = Simulator::with_config(SimulatorConfig::new().with_max_passes(11));
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, tail), Some(Level::Low));
    }

    #[test]
    fn test_fallback_retains_previous_gate_level() {
        let mut netlist = Netlist::new();
        let sw = netlist.add_switch("SW0");
        // T1 drives net B low while the switch is on
        let t1 = netlist.add_nmos();
        netlist.connect(t1.gate, netlist.switch_out(sw));
        netlist.connect(t1.source, NetId::GND);
        // T2's gate hangs off B; it conducts when B is low
        let t2 = netlist.add_pmos();
        netlist.connect(t2.gate, t1.drain);
        netlist.connect(t2.source, NetId::VDD);

        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, t1.drain), Some(Level::Low));
        assert_eq!(sim.level(&netlist, t2.drain), Some(Level::High));

        // Switch off: T1 stops conducting and B floats this step, but
        // T2 keeps conducting on B's remembered low level.
        netlist.set_switch(sw, false);
        sim.step(&netlist).unwrap();
        assert_eq!(sim.level(&netlist, t1.drain), None);
        assert_eq!(sim.level(&netlist, t2.drain), Some(Level::High));
    }

    #[test]
    fn test_dump_formats_labeled_nets() {
        let mut netlist = Netlist::new();
        let sw = netlist.add_switch("SW0");
        let _ = netlist.node_labeled("loose wire");
        netlist.set_switch(sw, false);

        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        let dump = sim.dump(&netlist);
        assert!(dump.contains("root: VDD  vol: H  name: VDD"));
        assert!(dump.contains("root: GND  vol: L  name: GND"));
        assert!(dump.contains("vol: L  name: SW0"));
        assert!(dump.contains("vol: ?  name: loose wire"));
    }

    #[test]
    fn test_dump_state_lists_parents_and_switches() {
        let mut netlist = Netlist::new();
        let a = netlist.node();
        netlist.connect(a, NetId::GND);
        let sw = netlist.add_switch("SW0");
        let mut sim = Simulator::new();
        sim.step(&netlist).unwrap();
        let dump = sim.dump_state(&netlist);
        assert!(dump.contains("root: VDD  vol: H"));
        assert!(dump.contains(&format!("parent[{}] = GND", a)));
        assert!(dump.contains(&format!("SW0: on  out: {}", netlist.switch_out(sw))));
    }
}
