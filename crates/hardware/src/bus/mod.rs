//! The five-channel single-beat handshake bus.
//!
//! This module provides:
//! 1. **Channel types:** `channel::{ArChannel, RChannel, AwChannel, WChannel,
//!    BChannel}` and the shared `handshake` helper.
//! 2. **Slave contract:** `BusSlave`, the trait every downstream responder
//!    (the reference memory model, or a test double) implements.

/// Channel payload types and the handshake helper.
pub mod channel;

pub use channel::{ArChannel, AwChannel, BChannel, BusResp, RChannel, WChannel, handshake};

/// A single cycle's worth of master-driven signals presented to a slave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// Read-address channel as driven by the arbiter this cycle.
    pub ar: ArChannel,
    /// Read-data channel's `ready` as driven by the arbiter this cycle.
    pub r_ready: bool,
    /// Write-address channel as driven by the arbiter this cycle.
    pub aw: AwChannel,
    /// Write-data channel as driven by the arbiter this cycle.
    pub w: WChannel,
    /// Write-response channel's `ready` as driven by the arbiter this cycle.
    pub b_ready: bool,
}

/// A single cycle's worth of slave-driven signals returned to the arbiter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Read-address channel's `ready` as driven by the slave this cycle.
    pub ar_ready: bool,
    /// Read-data channel as driven by the slave this cycle.
    pub r: RChannel,
    /// Write-address channel's `ready` as driven by the slave this cycle.
    pub aw_ready: bool,
    /// Write-data channel's `ready` as driven by the slave this cycle.
    pub w_ready: bool,
    /// Write-response channel as driven by the slave this cycle.
    pub b: BChannel,
}

/// The contract a downstream responder presents to the bus arbiter.
///
/// A `BusSlave` is driven exactly like real synchronous logic: `tick` reads
/// this cycle's master-driven request and returns this cycle's slave-driven
/// response, committing any internal state (e.g. a pending read latched by
/// an AR handshake) atomically before returning. Implementors must never
/// assert a channel's `valid` based on this same cycle's `ready` on another
/// channel.
#[cfg_attr(test, mockall::automock)]
pub trait BusSlave {
    /// Advances the slave by one cycle, producing this cycle's response to
    /// `request`.
    fn tick(&mut self, request: BusRequest) -> BusResponse;

    /// Resets all slave-internal state (e.g. a half-completed read) as if
    /// freshly constructed, without discarding backing storage contents.
    fn reset(&mut self);
}
