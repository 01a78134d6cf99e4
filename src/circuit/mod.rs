//! Circuit topology representation.
//!
//! This module provides the static description of a circuit: the net
//! arena with its union-find connectivity forest, the registered
//! transistors, and the switch drive sources. The [`Netlist`] is built
//! once and then only read by the solver; the single mutable exception
//! is each switch's control bit, which may be flipped between steps.

mod netlist;
mod types;

pub use netlist::{Netlist, Switch, Transistor};
pub use types::*;
