//! Cross-module tests driving a full `System`.

/// End-to-end scenarios: cold miss, write-through, MMIO bypass, arbitration.
pub mod scenarios;

/// Universal invariants checked across many requests rather than one fixture.
pub mod invariants;

/// Cycle-budget timeout path, exercised with a non-responding mock slave.
pub mod hang_detection;
