//! Cycle-accurate cache and bus simulator for a pipelined RV32I CPU.
//!
//! This crate implements:
//! 1. **Bus:** A five-channel, single-beat AMBA-like handshake protocol
//!    (`bus`) shared by every master and slave.
//! 2. **Core:** An instruction cache, a data cache, and a fixed-priority
//!    arbiter (`core::units`), each a finite-state machine driven one cycle
//!    at a time.
//! 3. **SoC:** `System`, which wires the caches and arbiter to a downstream
//!    slave, plus the reference memory slave used by the CLI demo and the
//!    integration tests (`soc`).
//! 4. **Simulation:** Flat memory image loading (`sim`), configuration, and
//!    statistics.

/// The five-channel handshake bus and the `BusSlave` contract.
pub mod bus;
/// Common types and constants (address decomposition, cache geometry).
pub mod common;
/// Simulator configuration (cache geometry, address map, defaults).
pub mod config;
/// Cache controllers, the arbiter, and CPU-facing request/response types.
pub mod core;
/// Flat memory image loading for the CLI demo.
pub mod sim;
/// System wiring (`System`) and the reference memory slave.
pub mod soc;
/// Hit/miss/refill counters and the system-wide statistics report.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level system (caches, arbiter, slave); construct with `System::new`.
pub use crate::soc::System;
/// System-wide hit/miss/write-through statistics report.
pub use crate::stats::SystemStats;
