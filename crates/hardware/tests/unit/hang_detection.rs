//! Cycle-budget timeout path: a slave that never asserts `ar_ready`.
//!
//! `mockall`'s generated `MockBusSlave` is gated behind `#[cfg(test)]` on the
//! library crate itself, so it is only reachable from unit tests compiled
//! into `rv-memsys-core` (see `soc::tests`), not from here. This integration
//! test exercises the same timeout path with a small hand-written
//! never-`ready` slave instead.

use rv_memsys_core::bus::{BusRequest, BusResponse, BusSlave};
use rv_memsys_core::core::{DataRequest, IFetchRequest};
use rv_memsys_core::soc::System;

struct DeafSlave;

impl BusSlave for DeafSlave {
    fn tick(&mut self, _request: BusRequest) -> BusResponse {
        BusResponse::default()
    }

    fn reset(&mut self) {}
}

#[test]
fn a_request_to_an_unresponsive_slave_never_completes_within_the_cycle_budget() {
    let mut system = System::new(DeafSlave, 0x2000_0000);
    let i_req = IFetchRequest {
        cpu_req: true,
        cpu_addr: 0x100,
    };

    for _ in 0..rv_memsys_core::common::HANG_DETECTION_THRESHOLD {
        let (i_resp, _) = system.step(i_req, DataRequest::default());
        assert!(i_resp.cpu_stall, "a deaf slave must never let a fetch complete");
    }
}
