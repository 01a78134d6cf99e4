//! Fixed-point voltage resolution.
//!
//! This module provides the engine that computes a steady-state logic
//! level for every reachable net of a [`Netlist`](crate::circuit::Netlist).
//!
//! ## Resolution algorithm
//!
//! Each simulation step rebuilds the voltage assignment from scratch:
//!
//! 1. Force the Vdd/Gnd rails HIGH/LOW.
//! 2. Force each switch's output net per its control bit.
//! 3. Primary relaxation: repeatedly scan every transistor and propagate
//!    levels through any device whose gate and source enable conduction,
//!    until a full scan assigns nothing new or the pass ceiling is hit.
//! 4. Fallback relaxation: for devices whose gate is still unresolved,
//!    substitute the gate level from the previous step's assignment and
//!    run the same pass-bounded scan. This retains the last sampled
//!    level of a memory-holding gate signal whose driver floats this
//!    step; only the gate lookup uses the old snapshot.
//!
//! Every write goes through one conflict-checked assignment: the same
//! net root receiving two different levels in one step is an electrical
//! short and fails the step with
//! [`VoltageConflict`](crate::SimError::VoltageConflict).

mod simulator;

pub use simulator::{Simulator, SimulatorConfig};

/// Default ceiling on relaxation passes per phase.
///
/// Each pass can always propagate a level through at least one more
/// series-connected transistor, so chains of up to this many devices
/// settle within one step regardless of device scan order. Longer
/// chains may be left partially unresolved; that is a documented limit
/// of the engine, not an error.
pub const MAX_RELAX_PASSES: usize = 10;
