//! System wiring: the caches, arbiter, and a bus slave driven together.
//!
//! This module provides [`System`], which owns an [`ICache`], a [`DCache`],
//! and an [`Arbiter`], and drives them against any [`BusSlave`] one cycle at
//! a time via [`System::step`]. It is generic over the slave so tests can
//! substitute a [`crate::bus::MockBusSlave`] for the reference
//! [`memory::MemorySlave`].

/// The reference memory slave used by the CLI demo and integration tests.
pub mod memory;

use crate::bus::BusSlave;
use crate::core::{Arbiter, DCache, DataRequest, DataResponse, ICache, IFetchRequest, IFetchResponse};

pub use memory::MemorySlave;

/// Owns the I-Cache, D-Cache, arbiter, and a downstream slave, and drives one
/// clock cycle per [`System::step`] call.
pub struct System<S: BusSlave = MemorySlave> {
    /// Instruction-fetch side cache.
    pub icache: ICache,
    /// Load/store side cache.
    pub dcache: DCache,
    arbiter: Arbiter,
    /// The downstream responder both caches share.
    pub slave: S,
}

impl<S: BusSlave> System<S> {
    /// Builds a system with fresh (all-invalid) caches, an idle arbiter, and
    /// the given slave.
    pub fn new(slave: S, mmio_base: u32) -> Self {
        Self {
            icache: ICache::new(),
            dcache: DCache::new(mmio_base),
            arbiter: Arbiter::new(),
            slave,
        }
    }

    /// Resets the caches, the arbiter, and the slave to their post-construction
    /// state, without discarding the slave's backing storage.
    pub fn reset(&mut self) {
        self.icache.reset();
        self.dcache.reset();
        self.arbiter.reset();
        self.slave.reset();
    }

    /// Advances the whole system by one cycle.
    ///
    /// Each cache first computes its combinational bus request from its
    /// current state, the arbiter routes both onto the slave, the slave
    /// produces this cycle's response, the arbiter fans that response back
    /// out, and finally each cache commits its next state from the response
    /// it was granted. A cache that does not own the R channel this cycle
    /// sees an all-`false`/zero response, identical to an un-granted master
    /// on a real bus.
    pub fn step(
        &mut self,
        i_req: IFetchRequest,
        d_req: DataRequest,
    ) -> (IFetchResponse, DataResponse) {
        let (i_resp, i_bus_req) = self.icache.bus_request(i_req);
        let d_bus_req = self.dcache.bus_request();

        let slave_req = self.arbiter.route_to_slave(i_bus_req, d_bus_req);
        let slave_resp = self.slave.tick(slave_req);
        let (i_bus_resp, d_bus_resp) = self.arbiter.route_to_masters(i_bus_req, d_bus_req, slave_resp);

        self.icache.commit(i_req, i_bus_resp);
        let d_resp = self.dcache.commit(d_req, d_bus_resp);
        self.arbiter.commit(i_bus_req, d_bus_req, slave_resp);

        (i_resp, d_resp)
    }
}
