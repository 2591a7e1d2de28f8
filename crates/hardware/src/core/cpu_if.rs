//! CPU-facing request/response contracts.
//!
//! The pipeline is out of scope: this module only specifies the signals it
//! must present to, and accept from, each cache. It provides:
//! 1. **Instruction side:** `IFetchRequest`/`IFetchResponse` for the I-Cache.
//! 2. **Data side:** `DataRequest`/`DataResponse` for the D-Cache.
//! 3. **Width encoding:** `Func3`, the store/load width code.

/// A single cycle's instruction-fetch request from the pipeline frontend.
///
/// While `cpu_stall` in the matching [`IFetchResponse`] is asserted, the
/// pipeline must keep this value unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IFetchRequest {
    /// Asserted when the frontend wants a word fetched.
    pub cpu_req: bool,
    /// Word-aligned address to fetch.
    pub cpu_addr: u32,
}

/// A single cycle's instruction-fetch response from the I-Cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IFetchResponse {
    /// The fetched instruction word. Valid combinationally on a hit cycle.
    pub cpu_data: u32,
    /// Asserted while the frontend must freeze.
    pub cpu_stall: bool,
}

/// Load/store width, encoded the way the pipeline encodes `func3` for
/// `sb`/`sh`/`sw`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func3 {
    /// `sb`/`lb`: single byte.
    Byte,
    /// `sh`/`lh`: two bytes (half-word).
    Half,
    /// `sw`/`lw`: four bytes (word).
    Word,
}

impl Func3 {
    /// Recovers a [`Func3`] from its raw 3-bit pipeline encoding.
    ///
    /// Returns `None` for any encoding outside `{0b000, 0b001, 0b010}`; per
    /// the design, such encodings are undefined and must not be issued by
    /// the producing pipeline.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0b000 => Some(Self::Byte),
            0b001 => Some(Self::Half),
            0b010 => Some(Self::Word),
            _ => None,
        }
    }
}

/// A single cycle's data-access request from the pipeline backend.
///
/// While `cpu_stall` in the matching [`DataResponse`] is asserted, the
/// pipeline must keep this value unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataRequest {
    /// Asserted when the backend wants an access performed.
    pub cpu_req: bool,
    /// Byte address to access.
    pub cpu_addr: u32,
    /// Asserted for a store, deasserted for a load.
    pub cpu_we: bool,
    /// Store data (ignored on a load).
    pub cpu_wdata: u32,
    /// Access width.
    pub cpu_func3: Func3,
}

impl Default for DataRequest {
    fn default() -> Self {
        Self {
            cpu_req: false,
            cpu_addr: 0,
            cpu_we: false,
            cpu_wdata: 0,
            cpu_func3: Func3::Word,
        }
    }
}

/// A single cycle's data-access response from the D-Cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataResponse {
    /// The loaded word (undefined content on a store cycle).
    pub cpu_data: u32,
    /// Asserted while the backend must freeze.
    pub cpu_stall: bool,
}
