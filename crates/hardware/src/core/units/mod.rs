//! Execution units: the two cache controllers and the bus arbiter.
//!
//! This module contains implementations of the memory-system components
//! that sit between the CPU-side interface and the shared bus slave.

/// Two-master, fixed-priority bus arbiter.
pub mod arbiter;

/// Direct-mapped, write-through, no-write-allocate data cache.
pub mod dcache;

/// Direct-mapped, read-only instruction cache.
pub mod icache;
