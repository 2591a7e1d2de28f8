//! Global cache-geometry constants.
//!
//! This module defines the fixed geometry shared by the I-Cache and D-Cache.
//! It includes:
//! 1. **Line geometry:** Line size, words per line, and the field widths
//!    used to decompose an address into tag/index/offset.
//! 2. **Set count:** The number of direct-mapped sets per cache.
//! 3. **Address map defaults:** The default MMIO boundary.

/// Size of one cache line in bytes (4 words).
pub const LINE_BYTES: u32 = 16;

/// Number of 32-bit words per cache line.
pub const WORDS_PER_LINE: usize = 4;

/// Number of direct-mapped sets per cache.
pub const NUM_SETS: usize = 256;

/// Number of bits in the set index field (`log2(NUM_SETS)`).
pub const INDEX_BITS: u32 = 8;

/// Number of bits in the word-offset field (`log2(WORDS_PER_LINE)`).
pub const WORD_OFFSET_BITS: u32 = 2;

/// Bit position where the tag field begins (`WORD_OFFSET_BITS + INDEX_BITS`).
pub const TAG_SHIFT: u32 = WORD_OFFSET_BITS + INDEX_BITS;

/// Mask that clears the byte offset within a line, yielding the line-aligned
/// base address (`addr & !LINE_ALIGN_MASK == addr & !0xF`).
pub const LINE_ALIGN_MASK: u32 = LINE_BYTES - 1;

/// Default physical address at which the uncacheable MMIO region begins.
///
/// Addresses below this are cacheable main memory; addresses at or above it
/// bypass both caches entirely.
pub const DEFAULT_MMIO_BASE: u32 = 0x2000_0000;

/// Maximum number of cycles a test harness will step the system while
/// waiting for `cpu_stall` to deassert, before treating the wait as a
/// protocol-violation timeout.
pub const HANG_DETECTION_THRESHOLD: u64 = 5_000;
