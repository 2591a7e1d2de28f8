//! Cache hit/miss and bus-activity counters.
//!
//! The source FSMs this crate is adapted from define hit/miss registers that
//! are never actually incremented; here they are real. This module provides:
//! 1. **Per-cache counters:** `CacheStats`, owned by each controller.
//! 2. **System-wide summary:** `SystemStats`, aggregated for reporting.

use std::fmt;

/// Hit/miss/refill counters for a single direct-mapped cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of `IdleCompare` cycles that resolved as a hit.
    pub hits: u64,
    /// Number of `IdleCompare` cycles that resolved as a miss.
    pub misses: u64,
    /// Number of completed line refills (`UpdateTag` commits).
    pub refills: u64,
}

impl CacheStats {
    /// Records a hit.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Records a miss.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records a completed refill.
    pub fn record_refill(&mut self) {
        self.refills += 1;
    }

    /// Fraction of lookups that hit, in `[0.0, 1.0]`. Returns `0.0` when no
    /// lookups have occurred yet.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Aggregated counters for both caches plus D-Cache-specific bus activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemStats {
    /// I-Cache hit/miss/refill counters.
    pub icache: CacheStats,
    /// D-Cache hit/miss/refill counters.
    pub dcache: CacheStats,
    /// Completed write-through transactions (AW+W+B).
    pub write_throughs: u64,
    /// Completed MMIO reads.
    pub mmio_reads: u64,
    /// Completed MMIO writes.
    pub mmio_writes: u64,
}

impl fmt::Display for SystemStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "MEMORY SYSTEM STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(
            f,
            "  icache  hits: {:<8} misses: {:<8} refills: {:<8} hit_rate: {:.2}%",
            self.icache.hits,
            self.icache.misses,
            self.icache.refills,
            self.icache.hit_rate() * 100.0
        )?;
        writeln!(
            f,
            "  dcache  hits: {:<8} misses: {:<8} refills: {:<8} hit_rate: {:.2}%",
            self.dcache.hits,
            self.dcache.misses,
            self.dcache.refills,
            self.dcache.hit_rate() * 100.0
        )?;
        writeln!(f, "  write_throughs: {}", self.write_throughs)?;
        writeln!(f, "  mmio_reads:     {}", self.mmio_reads)?;
        write!(f, "  mmio_writes:    {}", self.mmio_writes)
    }
}
