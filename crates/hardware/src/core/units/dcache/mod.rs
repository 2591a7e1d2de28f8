//! Direct-mapped, write-through, no-write-allocate data cache.
//!
//! The controller is an 8-state sequencer (see [`state::State`]) covering
//! cacheable refill, the MMIO bypass path, and the write-through sequence.
//! It is driven one cycle at a time via [`DCache::bus_request`]
//! (combinational bus outputs from the current state) followed by
//! [`DCache::commit`] (CPU-facing response plus next-state commit, using
//! this cycle's bus response).

/// The controller's phase and the data it latches per phase.
pub mod state;

/// Byte-strobe generation for partial stores.
pub mod strobe;

use tracing::{debug, trace};

use self::state::State;
pub use self::strobe::strobe_for;
use crate::bus::{ArChannel, AwChannel, BusRequest, BusResponse, WChannel, handshake};
use crate::common::addr::CacheAddr;
use crate::common::constants::{NUM_SETS, WORDS_PER_LINE};
use crate::core::cpu_if::{DataRequest, DataResponse};
use crate::stats::CacheStats;

/// Masks `wdata`'s bytes selected by `strb` into `word`, preserving the rest.
const fn apply_strobe(word: u32, wdata: u32, strb: u8) -> u32 {
    let mut result = word;
    let mut byte = 0;
    while byte < 4 {
        if strb & (1 << byte) != 0 {
            let shift = byte * 8;
            let mask = 0xFFu32 << shift;
            result = (result & !mask) | (wdata & mask);
        }
        byte += 1;
    }
    result
}

/// The D-Cache controller: tag/valid/data storage plus the write-through
/// FSM.
#[derive(Debug, Clone)]
pub struct DCache {
    tag_store: Vec<u32>,
    valid: Vec<bool>,
    data_store: Vec<[u32; WORDS_PER_LINE]>,
    state: State,
    mmio_base: u32,
    /// Hit/miss/refill counters.
    pub stats: CacheStats,
    /// Completed write-through transactions to cacheable space.
    pub write_throughs: u64,
    /// Completed MMIO reads.
    pub mmio_reads: u64,
    /// Completed MMIO writes.
    pub mmio_writes: u64,
}

impl DCache {
    /// Builds an empty D-Cache. Addresses at or above `mmio_base` bypass
    /// the cache array entirely.
    #[must_use]
    pub fn new(mmio_base: u32) -> Self {
        Self {
            tag_store: vec![0; NUM_SETS],
            valid: vec![false; NUM_SETS],
            data_store: vec![[0; WORDS_PER_LINE]; NUM_SETS],
            state: State::IdleCompare,
            mmio_base,
            stats: CacheStats::default(),
            write_throughs: 0,
            mmio_reads: 0,
            mmio_writes: 0,
        }
    }

    /// Clears all storage and returns the controller to `IdleCompare`.
    pub fn reset(&mut self) {
        self.valid.fill(false);
        self.state = State::IdleCompare;
        self.stats = CacheStats::default();
        self.write_throughs = 0;
        self.mmio_reads = 0;
        self.mmio_writes = 0;
    }

    fn is_hit(&self, addr: CacheAddr) -> bool {
        self.valid[addr.index()] && self.tag_store[addr.index()] == addr.tag()
    }

    fn is_mmio(&self, addr: u32) -> bool {
        CacheAddr::new(addr).is_mmio(self.mmio_base)
    }

    /// Computes this cycle's bus request from the current state alone. Does
    /// not mutate `self`. `IdleCompare` never drives a bus signal, so unlike
    /// [`DCache::commit`] this needs no CPU-side request.
    #[must_use]
    pub fn bus_request(&self) -> BusRequest {
        match self.state {
            State::IdleCompare | State::UpdateTag { .. } => BusRequest::default(),
            State::RefillRequest {
                miss_base,
                refill_cnt,
                ..
            } => BusRequest {
                ar: ArChannel {
                    valid: true,
                    ready: false,
                    addr: miss_base + u32::from(refill_cnt) * 4,
                },
                ..BusRequest::default()
            },
            State::RefillWait { .. } | State::ReadMMIOWait => BusRequest {
                r_ready: true,
                ..BusRequest::default()
            },
            State::ReadMMIO { addr } => BusRequest {
                ar: ArChannel {
                    valid: true,
                    ready: false,
                    addr,
                },
                ..BusRequest::default()
            },
            State::WriteBus {
                addr,
                data,
                strb,
                aw_done,
                w_done,
                ..
            } => BusRequest {
                aw: AwChannel {
                    valid: !aw_done,
                    ready: false,
                    addr,
                },
                w: WChannel {
                    valid: !w_done,
                    ready: false,
                    data,
                    strb,
                },
                ..BusRequest::default()
            },
            State::WaitBValid { .. } => BusRequest {
                b_ready: true,
                ..BusRequest::default()
            },
        }
    }

    /// Finalizes this cycle's CPU-facing response from the current state and
    /// this cycle's bus response, then commits the next state. Must be
    /// called with the same `req` passed to the preceding
    /// [`DCache::bus_request`] call.
    pub fn commit(&mut self, req: DataRequest, bus: BusResponse) -> DataResponse {
        match self.state {
            State::IdleCompare => self.commit_idle_compare(req),
            State::RefillRequest {
                index,
                tag,
                miss_base,
                refill_cnt,
            } => {
                self.state = if handshake(true, bus.ar_ready) {
                    State::RefillWait {
                        index,
                        tag,
                        miss_base,
                        refill_cnt,
                    }
                } else {
                    State::RefillRequest {
                        index,
                        tag,
                        miss_base,
                        refill_cnt,
                    }
                };
                DataResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                }
            }
            State::RefillWait {
                index,
                tag,
                miss_base,
                refill_cnt,
            } => {
                self.state = if handshake(bus.r.valid, true) {
                    self.data_store[index][refill_cnt as usize] = bus.r.data;
                    if refill_cnt == 3 {
                        State::UpdateTag { index, tag }
                    } else {
                        State::RefillRequest {
                            index,
                            tag,
                            miss_base,
                            refill_cnt: refill_cnt + 1,
                        }
                    }
                } else {
                    State::RefillWait {
                        index,
                        tag,
                        miss_base,
                        refill_cnt,
                    }
                };
                DataResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                }
            }
            State::UpdateTag { index, tag } => {
                self.tag_store[index] = tag;
                self.valid[index] = true;
                self.stats.record_refill();
                debug!(index, tag, "dcache line refilled");
                self.state = State::IdleCompare;
                DataResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                }
            }
            State::ReadMMIO { addr } => {
                self.state = if handshake(true, bus.ar_ready) {
                    State::ReadMMIOWait
                } else {
                    State::ReadMMIO { addr }
                };
                DataResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                }
            }
            State::ReadMMIOWait => {
                if handshake(bus.r.valid, true) {
                    self.mmio_reads += 1;
                    self.state = State::IdleCompare;
                    DataResponse {
                        cpu_data: bus.r.data,
                        cpu_stall: false,
                    }
                } else {
                    DataResponse {
                        cpu_data: 0,
                        cpu_stall: true,
                    }
                }
            }
            State::WriteBus {
                addr,
                data,
                strb,
                aw_done,
                w_done,
                is_mmio,
            } => {
                let aw_done = aw_done || handshake(true, bus.aw_ready);
                let w_done = w_done || handshake(true, bus.w_ready);
                self.state = if aw_done && w_done {
                    State::WaitBValid { is_mmio }
                } else {
                    State::WriteBus {
                        addr,
                        data,
                        strb,
                        aw_done,
                        w_done,
                        is_mmio,
                    }
                };
                DataResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                }
            }
            State::WaitBValid { is_mmio } => {
                if handshake(bus.b.valid, true) {
                    if is_mmio {
                        self.mmio_writes += 1;
                    } else {
                        self.write_throughs += 1;
                    }
                    self.state = State::IdleCompare;
                } else {
                    self.state = State::WaitBValid { is_mmio };
                }
                DataResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                }
            }
        }
    }

    fn commit_idle_compare(&mut self, req: DataRequest) -> DataResponse {
        if !req.cpu_req {
            return DataResponse::default();
        }

        let addr = CacheAddr::new(req.cpu_addr);
        let mmio = self.is_mmio(req.cpu_addr);

        if req.cpu_we {
            let strb = strobe_for(req.cpu_func3, addr.byte_offset());
            if !mmio && self.is_hit(addr) {
                let word = self.data_store[addr.index()][addr.word_offset()];
                self.data_store[addr.index()][addr.word_offset()] =
                    apply_strobe(word, req.cpu_wdata, strb);
            }
            trace!(addr = req.cpu_addr, mmio, "dcache write issued");
            self.state = State::WriteBus {
                addr: req.cpu_addr,
                data: req.cpu_wdata,
                strb,
                aw_done: false,
                w_done: false,
                is_mmio: mmio,
            };
            DataResponse {
                cpu_data: 0,
                cpu_stall: true,
            }
        } else if mmio {
            self.state = State::ReadMMIO {
                addr: req.cpu_addr,
            };
            DataResponse {
                cpu_data: 0,
                cpu_stall: true,
            }
        } else if self.is_hit(addr) {
            self.stats.record_hit();
            DataResponse {
                cpu_data: self.data_store[addr.index()][addr.word_offset()],
                cpu_stall: false,
            }
        } else {
            self.stats.record_miss();
            trace!(addr = req.cpu_addr, "dcache miss, starting refill");
            self.state = State::RefillRequest {
                index: addr.index(),
                tag: addr.tag(),
                miss_base: addr.line_base(),
                refill_cnt: 0,
            };
            DataResponse {
                cpu_data: 0,
                cpu_stall: true,
            }
        }
    }
}
