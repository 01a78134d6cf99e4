//! Error types for the switchsim simulator.
//!
//! The only runtime failure is [`SimError::VoltageConflict`]: two drivers
//! disagreeing about the level of one electrically unified net. Everything
//! else a malformed topology can produce — floating nets, unreachable
//! devices — is a valid outcome reported through the query API, not an
//! error.

use thiserror::Error;

use crate::circuit::{Level, NetId};

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for all switchsim operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Two drivers tried to force different levels onto the same net
    /// within one resolution step. This models an electrical short and
    /// indicates a topology bug; the step that raised it produced no
    /// usable voltage assignment.
    #[error("voltage conflict at net root {root}: already {existing}, driver attempted {attempted}")]
    VoltageConflict {
        /// Canonical root of the shorted net
        root: NetId,
        /// Level the root already held this step
        existing: Level,
        /// Level the losing driver tried to assign
        attempted: Level,
    },
}

impl SimError {
    /// Create a voltage conflict error.
    pub fn conflict(root: NetId, existing: Level, attempted: Level) -> Self {
        Self::VoltageConflict {
            root,
            existing,
            attempted,
        }
    }
}
