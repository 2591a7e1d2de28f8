//! Step-budget loop helper shared by the integration test suite.
//!
//! Drives a [`System`] until the side under test completes, or fails the
//! test (rather than hanging it or panicking the library) if the budget is
//! exhausted first. This is the test-level realization of the cycle-budget
//! timeout the CLI demo also applies.

use rv_memsys_core::bus::BusSlave;
use rv_memsys_core::core::{DataRequest, DataResponse, IFetchRequest, IFetchResponse};
use rv_memsys_core::soc::System;

/// Drives `system` with a held-steady `i_req` until the I-Cache deasserts
/// `cpu_stall`, returning the completing response.
///
/// # Panics
///
/// Panics if `budget` cycles elapse without completion.
pub fn run_fetch<S: BusSlave>(
    system: &mut System<S>,
    i_req: IFetchRequest,
    budget: u64,
) -> IFetchResponse {
    for _ in 0..budget {
        let (i_resp, _) = system.step(i_req, DataRequest::default());
        if !i_resp.cpu_stall {
            return i_resp;
        }
    }
    panic!("fetch at {:#x} did not complete within {budget} cycles", i_req.cpu_addr);
}

/// Drives `system` with a held-steady load `d_req` until the D-Cache
/// deasserts `cpu_stall`, returning the completing response.
///
/// # Panics
///
/// Panics if `budget` cycles elapse, or if `d_req` is a store (use
/// [`run_store`] instead: a store's completing cycle never itself reports
/// `cpu_stall = false`, by this controller's design).
pub fn run_data<S: BusSlave>(
    system: &mut System<S>,
    d_req: DataRequest,
    budget: u64,
) -> DataResponse {
    assert!(!d_req.cpu_we, "use run_store for a write request");
    for _ in 0..budget {
        let (_, d_resp) = system.step(IFetchRequest::default(), d_req);
        if !d_resp.cpu_stall {
            return d_resp;
        }
    }
    panic!("data access at {:#x} did not complete within {budget} cycles", d_req.cpu_addr);
}

/// Drives `system` with a held-steady store `d_req` until its write-through
/// (or MMIO write) counter advances.
///
/// A store's B-handshake cycle still reports `cpu_stall = true` (the
/// controller only signals completion by returning to `IdleCompare`, not by
/// deasserting stall on that same cycle) so completion is observed through
/// the counters instead of the response.
///
/// # Panics
///
/// Panics if `budget` cycles elapse without the store completing.
pub fn run_store<S: BusSlave>(system: &mut System<S>, d_req: DataRequest, budget: u64) {
    assert!(d_req.cpu_we, "use run_data for a load request");
    let before = system.dcache.write_throughs + system.dcache.mmio_writes;
    for _ in 0..budget {
        let _ = system.step(IFetchRequest::default(), d_req);
        if system.dcache.write_throughs + system.dcache.mmio_writes > before {
            return;
        }
    }
    panic!("store at {:#x} did not complete within {budget} cycles", d_req.cpu_addr);
}
