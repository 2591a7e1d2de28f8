//! The D-Cache's eight-state sequencer.

/// Current phase of the D-Cache controller.
///
/// Covers cacheable refill (shared shape with the I-Cache), the MMIO bypass
/// path, and the write-through sequence. Each non-idle variant carries the
/// data latched when the controller left `IdleCompare`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Decision hub: on `cpu_req`, forks by `cpu_we` and the MMIO predicate.
    IdleCompare,

    /// Driving `AR.valid` for word `refill_cnt` of a cacheable read miss.
    RefillRequest {
        /// Set index of the missed line.
        index: usize,
        /// Tag to commit once the refill completes.
        tag: u32,
        /// 16-byte-aligned base address of the missed line.
        miss_base: u32,
        /// Which of the four words is currently being requested.
        refill_cnt: u8,
    },

    /// Driving `R.ready`, waiting for word `refill_cnt` of a refill.
    RefillWait {
        /// Set index of the missed line.
        index: usize,
        /// Tag to commit once the refill completes.
        tag: u32,
        /// 16-byte-aligned base address of the missed line.
        miss_base: u32,
        /// Which of the four words is currently awaited.
        refill_cnt: u8,
    },

    /// Committing `tag_store`/`valid` for the now-complete refilled line.
    UpdateTag {
        /// Set index to mark valid.
        index: usize,
        /// Tag to store.
        tag: u32,
    },

    /// Driving a single `AR` for an MMIO read at the exact (unaligned) CPU
    /// address.
    ReadMMIO {
        /// The exact byte address being read.
        addr: u32,
    },

    /// Awaiting the single `R` beat for an MMIO read; `cpu_data` is
    /// forwarded combinationally from the R-channel payload.
    ReadMMIOWait,

    /// Driving `AW` and `W` concurrently for a write-through store.
    WriteBus {
        /// Byte address of the store.
        addr: u32,
        /// Raw store data (unmasked; the bus applies `strb`).
        data: u32,
        /// Per-byte write mask.
        strb: u8,
        /// Whether the AW handshake has already completed this transaction.
        aw_done: bool,
        /// Whether the W handshake has already completed this transaction.
        w_done: bool,
        /// Whether this write targets the MMIO region, for stats purposes.
        is_mmio: bool,
    },

    /// Driving `B.ready`, awaiting the write response.
    WaitBValid {
        /// Whether the completing write targets the MMIO region, for stats
        /// purposes.
        is_mmio: bool,
    },
}
