//! Configuration for the cache and bus subsystem.
//!
//! This module defines the structures used to parameterize the simulator.
//! It provides:
//! 1. **Defaults:** Baseline geometry and address-map constants.
//! 2. **Structures:** `CacheGeometry`, `BusMapConfig`, and the root `Config`.
//!
//! Configuration is supplied as JSON (e.g. by the CLI demo binary) or by
//! using `Config::default()`, which reproduces the fixed 256-set/16-byte-line
//! geometry used throughout the design.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default number of direct-mapped sets per cache.
    pub const NUM_SETS: usize = 256;

    /// Default cache line size in bytes.
    pub const LINE_BYTES: u32 = 16;

    /// Default physical address at which the MMIO region begins.
    pub const MMIO_BASE: u32 = 0x2000_0000;

    /// Default capacity, in words, of the reference memory slave used by
    /// tests and the CLI demo.
    pub const SLAVE_WORDS: usize = 1 << 16;
}

/// Geometry shared by the I-Cache and D-Cache.
///
/// Both caches in this design use an identical direct-mapped geometry; only
/// their FSMs and write policy differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheGeometry {
    /// Number of direct-mapped sets.
    #[serde(default = "CacheGeometry::default_num_sets")]
    pub num_sets: usize,

    /// Line size in bytes. Must be a non-zero power of two.
    #[serde(default = "CacheGeometry::default_line_bytes")]
    pub line_bytes: u32,
}

impl CacheGeometry {
    /// Returns the default number of sets (256).
    fn default_num_sets() -> usize {
        defaults::NUM_SETS
    }

    /// Returns the default line size in bytes (16).
    fn default_line_bytes() -> u32 {
        defaults::LINE_BYTES
    }

    /// Validates that the geometry's field widths are well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLineSize`] or
    /// [`ConfigError::InvalidSetCount`] if either field is zero or not a
    /// power of two.
    pub fn validate(self) -> Result<(), ConfigError> {
        if self.line_bytes == 0 || !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::InvalidLineSize(self.line_bytes));
        }
        if self.num_sets == 0 || !self.num_sets.is_power_of_two() {
            return Err(ConfigError::InvalidSetCount(self.num_sets));
        }
        Ok(())
    }

    /// Number of 32-bit words per line.
    #[must_use]
    pub const fn words_per_line(self) -> usize {
        (self.line_bytes / 4) as usize
    }
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            line_bytes: defaults::LINE_BYTES,
        }
    }
}

/// Address-map configuration: where the cacheable region ends and the
/// uncacheable MMIO region begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BusMapConfig {
    /// First address treated as MMIO. Addresses below this are cacheable.
    #[serde(default = "BusMapConfig::default_mmio_base")]
    pub mmio_base: u32,
}

impl BusMapConfig {
    /// Returns the default MMIO base address (`0x2000_0000`).
    fn default_mmio_base() -> u32 {
        defaults::MMIO_BASE
    }

    /// Validates that `mmio_base` is word-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MisalignedMmioBase`] if `mmio_base` is not a
    /// multiple of 4.
    pub fn validate(self) -> Result<(), ConfigError> {
        if self.mmio_base % 4 != 0 {
            return Err(ConfigError::MisalignedMmioBase(self.mmio_base));
        }
        Ok(())
    }
}

impl Default for BusMapConfig {
    fn default() -> Self {
        Self {
            mmio_base: defaults::MMIO_BASE,
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use rv_memsys_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.geometry.num_sets, 256);
/// assert_eq!(config.bus_map.mmio_base, 0x2000_0000);
/// ```
///
/// Deserializing a partial override from JSON:
///
/// ```
/// use rv_memsys_core::config::Config;
///
/// let json = r#"{ "bus_map": { "mmio_base": 4096 } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.bus_map.mmio_base, 4096);
/// assert_eq!(config.geometry.num_sets, 256);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Shared I-Cache/D-Cache geometry.
    #[serde(default)]
    pub geometry: CacheGeometry,

    /// Cacheable/MMIO address-map boundary.
    #[serde(default)]
    pub bus_map: BusMapConfig,

    /// Capacity, in words, of the reference memory slave.
    #[serde(default = "Config::default_slave_words")]
    pub slave_words: usize,
}

impl Config {
    /// Returns the default memory-slave capacity in words (64 Ki words).
    fn default_slave_words() -> usize {
        defaults::SLAVE_WORDS
    }

    /// Validates every sub-configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered while validating
    /// [`CacheGeometry`] or [`BusMapConfig`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.bus_map.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: CacheGeometry::default(),
            bus_map: BusMapConfig::default(),
            slave_words: defaults::SLAVE_WORDS,
        }
    }
}
