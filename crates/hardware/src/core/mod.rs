//! Cache controllers and the contract they present to the CPU.
//!
//! This module contains the I-Cache and D-Cache finite-state machines, the
//! bus arbiter that multiplexes them onto the shared slave, and the
//! request/response types the out-of-scope pipeline is expected to drive.

/// CPU-facing request/response types (`IFetchRequest`, `DataRequest`, ...).
pub mod cpu_if;

/// I-Cache, D-Cache, and arbiter controllers.
pub mod units;

pub use cpu_if::{DataRequest, DataResponse, Func3, IFetchRequest, IFetchResponse};
pub use units::arbiter::Arbiter;
pub use units::dcache::DCache;
pub use units::icache::ICache;
