//! Core types for circuit representation.

use std::fmt;

/// A unique identifier for an electrical net.
/// Nets 0 and 1 are always the Vdd and Gnd rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(pub usize);

impl NetId {
    /// The Vdd rail (always index 0), forced HIGH every step.
    pub const VDD: NetId = NetId(0);

    /// The Gnd rail (always index 1), forced LOW every step.
    pub const GND: NetId = NetId(1);

    /// Check if this is one of the two reserved rail nets.
    pub fn is_rail(&self) -> bool {
        self.0 <= 1
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NetId::VDD => write!(f, "VDD"),
            NetId::GND => write!(f, "GND"),
            NetId(n) => write!(f, "N{}", n),
        }
    }
}

/// Handle for a switch registered in a [`Netlist`](super::Netlist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwitchId(pub usize);

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SW{}", self.0)
    }
}

/// A resolved logic level.
///
/// Only two discrete levels exist. An unresolved ("floating") net is
/// represented as the absence of a level (`Option<Level>::None`), never
/// as a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Logic high (Vdd)
    High,
    /// Logic low (Gnd)
    Low,
}

impl Level {
    /// Single-character form used by the debug dumps (`H` / `L`).
    pub fn symbol(&self) -> char {
        match self {
            Level::High => 'H',
            Level::Low => 'L',
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Transistor polarity.
///
/// Determines the gate level that turns the device on and the level it
/// pulls its drain toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Conducts when gate is HIGH and source is LOW; pulls drain LOW.
    Nmos,
    /// Conducts when gate is LOW and source is HIGH; pulls drain HIGH.
    Pmos,
}
