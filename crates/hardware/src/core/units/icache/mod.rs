//! Direct-mapped, read-only instruction cache.
//!
//! The controller is a 4-state refill sequencer (see [`state::State`]) driven
//! one cycle at a time via [`ICache::bus_request`] (combinational outputs
//! from the current state) followed by [`ICache::commit`] (next-state
//! commit using this cycle's bus response). No path other than the refill
//! sequencer ever writes `data_store`.

/// The controller's phase and the data it latches per phase.
pub mod state;

use tracing::{debug, trace};

use self::state::State;
use crate::bus::{ArChannel, BusRequest, BusResponse, handshake};
use crate::common::addr::CacheAddr;
use crate::common::constants::{NUM_SETS, WORDS_PER_LINE};
use crate::core::cpu_if::{IFetchRequest, IFetchResponse};
use crate::stats::CacheStats;

/// The I-Cache controller: tag/valid/data storage plus the refill FSM.
#[derive(Debug, Clone)]
pub struct ICache {
    tag_store: Vec<u32>,
    valid: Vec<bool>,
    data_store: Vec<[u32; WORDS_PER_LINE]>,
    state: State,
    /// Hit/miss/refill counters.
    pub stats: CacheStats,
}

impl ICache {
    /// Builds an empty I-Cache (`valid = false` for every set).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag_store: vec![0; NUM_SETS],
            valid: vec![false; NUM_SETS],
            data_store: vec![[0; WORDS_PER_LINE]; NUM_SETS],
            state: State::IdleCompare,
            stats: CacheStats::default(),
        }
    }

    /// Clears all storage and returns the controller to `IdleCompare`.
    pub fn reset(&mut self) {
        self.valid.fill(false);
        self.state = State::IdleCompare;
        self.stats = CacheStats::default();
    }

    /// Whether `addr`'s set currently holds `addr`'s tag.
    fn is_hit(&self, addr: CacheAddr) -> bool {
        self.valid[addr.index()] && self.tag_store[addr.index()] == addr.tag()
    }

    /// Computes this cycle's CPU-facing response and bus request from the
    /// current state alone. Does not mutate `self`.
    #[must_use]
    pub fn bus_request(&self, req: IFetchRequest) -> (IFetchResponse, BusRequest) {
        match self.state {
            State::IdleCompare => {
                if !req.cpu_req {
                    return (IFetchResponse::default(), BusRequest::default());
                }
                let addr = CacheAddr::new(req.cpu_addr);
                if self.is_hit(addr) {
                    let data = self.data_store[addr.index()][addr.word_offset()];
                    (
                        IFetchResponse {
                            cpu_data: data,
                            cpu_stall: false,
                        },
                        BusRequest::default(),
                    )
                } else {
                    (
                        IFetchResponse {
                            cpu_data: 0,
                            cpu_stall: true,
                        },
                        BusRequest::default(),
                    )
                }
            }
            State::RefillRequest {
                miss_base,
                refill_cnt,
                ..
            } => {
                let bus = BusRequest {
                    ar: ArChannel {
                        valid: true,
                        ready: false,
                        addr: miss_base + u32::from(refill_cnt) * 4,
                    },
                    ..BusRequest::default()
                };
                (
                    IFetchResponse {
                        cpu_data: 0,
                        cpu_stall: true,
                    },
                    bus,
                )
            }
            State::RefillWait { .. } => (
                IFetchResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                },
                BusRequest {
                    r_ready: true,
                    ..BusRequest::default()
                },
            ),
            State::UpdateTag { .. } => (
                IFetchResponse {
                    cpu_data: 0,
                    cpu_stall: true,
                },
                BusRequest::default(),
            ),
        }
    }

    /// Commits the next state using this cycle's bus response, and updates
    /// storage and counters. Must be called with the same `req` passed to
    /// the preceding [`ICache::bus_request`] call.
    pub fn commit(&mut self, req: IFetchRequest, bus: BusResponse) {
        self.state = match self.state {
            State::IdleCompare => {
                if req.cpu_req {
                    let addr = CacheAddr::new(req.cpu_addr);
                    if self.is_hit(addr) {
                        self.stats.record_hit();
                        State::IdleCompare
                    } else {
                        self.stats.record_miss();
                        trace!(addr = req.cpu_addr, "icache miss, starting refill");
                        State::RefillRequest {
                            index: addr.index(),
                            tag: addr.tag(),
                            miss_base: addr.line_base(),
                            refill_cnt: 0,
                        }
                    }
                } else {
                    State::IdleCompare
                }
            }
            State::RefillRequest {
                index,
                tag,
                miss_base,
                refill_cnt,
            } => {
                if handshake(true, bus.ar_ready) {
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
                }
            }
            State::RefillWait {
                index,
                tag,
                miss_base,
                refill_cnt,
            } => {
                if handshake(bus.r.valid, true) {
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
                }
            }
            State::UpdateTag { index, tag } => {
                self.tag_store[index] = tag;
                self.valid[index] = true;
                self.stats.record_refill();
                debug!(index, tag, "icache line refilled");
                State::IdleCompare
            }
        };
    }
}

impl Default for ICache {
    fn default() -> Self {
        Self::new()
    }
}
