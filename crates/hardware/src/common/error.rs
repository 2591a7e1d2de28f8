//! Construction-time error types.
//!
//! The cache and arbiter state machines never fail at runtime: bus responses
//! are assumed OKAY and nothing is retried or surfaced to the CPU beyond
//! `cpu_stall`/`cpu_data`. The only place a `Result` is meaningful is at
//! construction, where a configuration could describe an inconsistent or
//! unsupported geometry. This module provides:
//! 1. **`ConfigError`:** Fallible construction of `CacheGeometry` and
//!    `BusMapConfig`.
//! 2. **`SlaveError`:** Bounds-checking for the test/demo memory slave.

use thiserror::Error;

/// Errors raised while constructing simulator configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The line size was not a power of two, or was zero.
    #[error("line_bytes must be a non-zero power of two, got {0}")]
    InvalidLineSize(u32),

    /// The set count was not a power of two, or was zero.
    #[error("num_sets must be a non-zero power of two, got {0}")]
    InvalidSetCount(usize),

    /// The MMIO base was not word-aligned.
    #[error("mmio_base must be word-aligned, got {0:#010x}")]
    MisalignedMmioBase(u32),
}

/// Errors raised by the reference memory slave used in tests and the CLI
/// demo.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SlaveError {
    /// An access targeted a word address beyond the slave's backing store.
    #[error("word address {word_addr:#010x} is out of bounds (capacity {capacity} words)")]
    OutOfBounds {
        /// The word address (`byte_addr >> 2`) that was out of range.
        word_addr: u32,
        /// The number of words backing the slave.
        capacity: usize,
    },
}
