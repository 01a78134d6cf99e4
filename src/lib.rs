//! # Switchsim
//!
//! A switch-level digital circuit simulator for MOS transistor networks.
//!
//! This library provides:
//! - An electrical net arena with union-find connectivity (wiring nets
//!   together models an ideal zero-resistance wire)
//! - An abstract transistor model: N-type and P-type voltage-gated
//!   conditional connectors between nets
//! - A fixed-point relaxation solver that resolves every reachable net
//!   to a discrete HIGH/LOW level each simulation step
//! - A small standard-cell library (inverter, NAND) built from
//!   transistor pairs
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Net registry, connectivity forest, devices, switches
//! - [`solver`] - The fixed-point voltage resolution engine
//! - [`cells`] - Standard cells composed from the circuit primitives
//!
//! ## Usage
//!
//! ```
//! use switchsim::{Level, Nand, Netlist, Simulator};
//!
//! let mut netlist = Netlist::new();
//! let nand = Nand::new(&mut netlist, "NAND1");
//! let a = netlist.add_switch("A");
//! let b = netlist.add_switch("B");
//! netlist.connect(nand.input_a, netlist.switch_out(a));
//! netlist.connect(nand.input_b, netlist.switch_out(b));
//!
//! let mut sim = Simulator::new();
//! sim.step(&netlist)?;
//! assert_eq!(sim.level(&netlist, nand.output), Some(Level::Low));
//!
//! netlist.set_switch(a, false);
//! sim.step(&netlist)?;
//! assert_eq!(sim.level(&netlist, nand.output), Some(Level::High));
//! # Ok::<(), switchsim::SimError>(())
//! ```
//!
//! ## Simulation method
//!
//! Each step rebuilds the voltage assignment from scratch: the two rail
//! nets and every switch output are forced first, then levels relax
//! through conducting transistors in pass-bounded scans until a fixed
//! point is reached. Gates left floating by the current step fall back
//! to their previous step's level, which is what lets feedback circuits
//! hold state. Two drivers disagreeing about one net is an electrical
//! short and fails the step with [`SimError::VoltageConflict`].
//!
//! Nets with no driving path stay unresolved; queries report them as
//! `None` rather than inventing a level.

pub mod cells;
pub mod circuit;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use cells::{Nand, Not};
pub use circuit::{Level, NetId, Netlist, Polarity, SwitchId, Transistor};
pub use error::{Result, SimError};
pub use solver::{Simulator, SimulatorConfig, MAX_RELAX_PASSES};
