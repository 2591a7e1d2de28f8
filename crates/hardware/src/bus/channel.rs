//! Single-beat handshake channels.
//!
//! This module defines the five AMBA-like channels shared by every master and
//! slave in the subsystem, plus the `handshake` helper that every FSM uses to
//! decide whether a transfer completed this cycle. It provides:
//! 1. **Read channels:** `ArChannel` (address) and `RChannel` (data).
//! 2. **Write channels:** `AwChannel` (address), `WChannel` (data + strobe),
//!    and `BChannel` (response).
//! 3. **Handshake evaluation:** `handshake`, the single place that decides
//!    "did a transfer occur this cycle".

use tracing::trace;

/// Two-bit response code carried by the R and B channels.
///
/// Only `Okay` is ever produced by the reference memory slave in this crate;
/// the other variants exist so a test-only slave can exercise code paths
/// that accept a response code. No cache controller in this crate inspects
/// `resp`; response codes are never propagated to the CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BusResp {
    /// Transfer completed successfully.
    #[default]
    Okay,
    /// Slave-side error.
    SlvErr,
    /// Decode error: no slave claimed this address.
    DecErr,
}

/// Read-address channel (master → slave): the address of a pending read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArChannel {
    /// Asserted by the master while an address is being presented.
    pub valid: bool,
    /// Asserted by the slave when it accepts the address this cycle.
    pub ready: bool,
    /// The word-granular byte address being read.
    pub addr: u32,
}

/// Read-data channel (slave → master): the data returned for a prior AR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RChannel {
    /// Asserted by the slave while data is being presented.
    pub valid: bool,
    /// Asserted by the master when it accepts the data this cycle.
    pub ready: bool,
    /// The 32-bit word returned by the slave.
    pub data: u32,
    /// Response code accompanying the data.
    pub resp: BusResp,
}

/// Write-address channel (master → slave): the address of a pending write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AwChannel {
    /// Asserted by the master while an address is being presented.
    pub valid: bool,
    /// Asserted by the slave when it accepts the address this cycle.
    pub ready: bool,
    /// The word-granular byte address being written.
    pub addr: u32,
}

/// Write-data channel (master → slave): the data and byte strobes of a
/// pending write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WChannel {
    /// Asserted by the master while data is being presented.
    pub valid: bool,
    /// Asserted by the slave when it accepts the data this cycle.
    pub ready: bool,
    /// The 32-bit word to write.
    pub data: u32,
    /// Per-byte write mask; bit `i` set means byte `i` of `data` is written.
    pub strb: u8,
}

/// Write-response channel (slave → master): acknowledgement of a completed
/// write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BChannel {
    /// Asserted by the slave while a response is being presented.
    pub valid: bool,
    /// Asserted by the master when it accepts the response this cycle.
    pub ready: bool,
    /// Response code for the completed write.
    pub resp: BusResp,
}

/// Evaluates whether a one-beat transfer completes this cycle given the
/// source's `valid` and the sink's `ready`.
///
/// This is the single point every channel uses to decide "did a handshake
/// happen". `valid` must never be derived from this cycle's `ready`; callers
/// are responsible for holding `valid` high across cycles until this returns
/// `true`.
#[inline]
#[must_use]
pub fn handshake(valid: bool, ready: bool) -> bool {
    let fired = valid && ready;
    if fired {
        trace!("handshake fired");
    }
    fired
}
