//! Common utilities and types shared across the cache and bus subsystem.
//!
//! This module provides fundamental building blocks used by every component
//! of the memory system. It includes:
//! 1. **Address Types:** `CacheAddr`, a view over a raw address that exposes
//!    the tag/index/word-offset fields used by both caches.
//! 2. **Constants:** Cache geometry and address-map defaults.
//! 3. **Error Handling:** Construction-time configuration and slave errors.

/// Address decomposition for the direct-mapped cache geometry.
pub mod addr;

/// Cache geometry and address-map constants.
pub mod constants;

/// Construction-time error types.
pub mod error;

pub use addr::CacheAddr;
pub use constants::{
    DEFAULT_MMIO_BASE, HANG_DETECTION_THRESHOLD, INDEX_BITS, LINE_ALIGN_MASK, LINE_BYTES,
    NUM_SETS, TAG_SHIFT, WORDS_PER_LINE, WORD_OFFSET_BITS,
};
pub use error::{ConfigError, SlaveError};
