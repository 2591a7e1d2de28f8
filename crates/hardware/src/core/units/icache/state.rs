//! The I-Cache's four-state refill sequencer.

/// Current phase of the I-Cache controller.
///
/// Each non-idle variant carries the data latched when the controller left
/// `IdleCompare`, so the controller never needs boolean flags alongside the
/// phase to know what it is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Comparing `cpu_addr` against the tag store; a hit completes here in
    /// zero extra cycles.
    IdleCompare,

    /// Driving `AR.valid` for word `refill_cnt` of the missed line.
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

    /// Driving `R.ready`, waiting for word `refill_cnt` to arrive.
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

    /// Committing `tag_store`/`valid` for the now-complete line.
    UpdateTag {
        /// Set index to mark valid.
        index: usize,
        /// Tag to store.
        tag: u32,
    },
}
