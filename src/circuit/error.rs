//! Error types for circuit construction and configuration.

use thiserror::Error;

/// Errors raised when building a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// The gene sequence does not have `2 * NUM_UNITS + 1` entries.
    #[error("chromosome must have {expected} genes, got {actual}")]
    ChromosomeLength { expected: usize, actual: usize },
}

/// Rule broken by an illegal topology.
///
/// Returned by [`Circuit::validate`](super::Circuit::validate); the first
/// violation found wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyViolation {
    /// The external feed points at a terminal instead of a unit.
    #[error("feed enters terminal {0} instead of a unit")]
    FeedIsTerminal(usize),

    /// The feed index is neither a unit nor a terminal.
    #[error("feed index {0} is out of range")]
    FeedOutOfRange(usize),

    /// A unit cannot be reached from the feed.
    #[error("unit {0} is unreachable from the feed")]
    Unreachable(usize),

    /// Both streams of a unit go to the same destination.
    #[error("unit {0} sends both streams to the same destination")]
    IdenticalTargets(usize),

    /// A unit feeds one of its own streams back into itself.
    #[error("unit {0} routes a stream to itself")]
    SelfLoop(usize),

    /// An out-of-range target is not the terminal for its stream.
    #[error("unit {unit} routes its {stream} stream to invalid destination {target}")]
    MisroutedExit {
        unit: usize,
        stream: &'static str,
        target: usize,
    },

    /// No stream ever leaves through the concentrate terminal.
    #[error("no stream reaches the concentrate exit")]
    NoConcentrateExit,

    /// No stream ever leaves through the tailings terminal.
    #[error("no stream reaches the tailings exit")]
    NoTailingsExit,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
