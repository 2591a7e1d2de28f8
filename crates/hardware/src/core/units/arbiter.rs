//! Two-master, fixed-priority bus arbiter.
//!
//! Multiplexes the I-Cache (`m0`) and D-Cache (`m1`) read channels onto one
//! downstream slave, with fixed priority for the D-Cache. The write side is
//! a pass-through from the D-Cache alone: the I-Cache is read-only, so its
//! AW/W/B signals are always tied off.

use tracing::trace;

use crate::bus::{BusRequest, BusResponse, handshake};

/// Which master currently owns the downstream read channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// No active read transaction downstream.
    #[default]
    Idle,
    /// The D-Cache (`m1`) owns the R channel.
    ReadM1,
    /// The I-Cache (`m0`) owns the R channel.
    ReadM0,
}

/// The fixed-priority arbiter. Holds no storage beyond the current read
/// owner; both masters' full bus requests are supplied each cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arbiter {
    state: State,
}

impl Arbiter {
    /// Builds an arbiter with no active transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the arbiter to `Idle`.
    pub fn reset(&mut self) {
        self.state = State::default();
    }

    /// Routes `m0` (I-Cache) and `m1` (D-Cache) requests onto a single
    /// downstream request, using the current read-ownership state. Does not
    /// mutate `self`.
    #[must_use]
    pub fn route_to_slave(&self, m0: BusRequest, m1: BusRequest) -> BusRequest {
        // m1's write side passes straight through: m0 is read-only.
        let aw = m1.aw;
        let w = m1.w;
        let b_ready = m1.b_ready;

        let (ar, r_ready) = match self.state {
            State::Idle => {
                if m1.ar.valid {
                    (m1.ar, m1.r_ready)
                } else if m0.ar.valid {
                    (m0.ar, m0.r_ready)
                } else {
                    (m1.ar, m1.r_ready)
                }
            }
            State::ReadM1 => (m1.ar, m1.r_ready),
            State::ReadM0 => (m0.ar, m0.r_ready),
        };

        BusRequest {
            ar,
            r_ready,
            aw,
            w,
            b_ready,
        }
    }

    /// Routes the slave's response back to each master's view: `m0` always
    /// sees its write side tied off (`aw_ready = w_ready = false`,
    /// `b.valid = false`), and each master sees the R channel only while it
    /// owns it. `m0`/`m1` are the same requests passed to
    /// [`Arbiter::route_to_slave`] this cycle: the AR handshake itself fires
    /// while `state` is still `Idle` (it only commits to `ReadM0`/`ReadM1`
    /// the following cycle), so the grant decision must be recomputed here
    /// rather than read off `self.state`.
    #[must_use]
    pub fn route_to_masters(
        &self,
        m0: BusRequest,
        m1: BusRequest,
        slave: BusResponse,
    ) -> (BusResponse, BusResponse) {
        let grant = match self.state {
            State::Idle => {
                if m1.ar.valid {
                    State::ReadM1
                } else if m0.ar.valid {
                    State::ReadM0
                } else {
                    State::Idle
                }
            }
            owned => owned,
        };

        let m0_r = if self.state == State::ReadM0 {
            slave.r
        } else {
            crate::bus::RChannel::default()
        };
        let m1_r = if self.state == State::ReadM1 {
            slave.r
        } else {
            crate::bus::RChannel::default()
        };

        let m0_ar_ready = grant == State::ReadM0 && slave.ar_ready;
        let m1_ar_ready = grant == State::ReadM1 && slave.ar_ready;
        let m0 = BusResponse {
            ar_ready: m0_ar_ready,
            r: m0_r,
            aw_ready: false,
            w_ready: false,
            b: crate::bus::BChannel::default(),
        };
        let m1 = BusResponse {
            ar_ready: m1_ar_ready,
            r: m1_r,
            aw_ready: slave.aw_ready,
            w_ready: slave.w_ready,
            b: slave.b,
        };
        (m0, m1)
    }

    /// Commits the next read-ownership state given the same `m0`/`m1`
    /// requests and slave response used to compute this cycle's routing.
    pub fn commit(&mut self, m0: BusRequest, m1: BusRequest, slave: BusResponse) {
        self.state = match self.state {
            State::Idle => {
                if m1.ar.valid {
                    if handshake(true, slave.ar_ready) {
                        trace!("arbiter granting AR to m1 (D-Cache)");
                        State::ReadM1
                    } else {
                        State::Idle
                    }
                } else if m0.ar.valid {
                    if handshake(true, slave.ar_ready) {
                        trace!("arbiter granting AR to m0 (I-Cache)");
                        State::ReadM0
                    } else {
                        State::Idle
                    }
                } else {
                    State::Idle
                }
            }
            State::ReadM1 => {
                if handshake(slave.r.valid, m1.r_ready) {
                    State::Idle
                } else {
                    State::ReadM1
                }
            }
            State::ReadM0 => {
                if handshake(slave.r.valid, m0.r_ready) {
                    State::Idle
                } else {
                    State::ReadM0
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{ArChannel, RChannel};

    fn ar_request(addr: u32) -> BusRequest {
        BusRequest {
            ar: ArChannel {
                valid: true,
                ready: false,
                addr,
            },
            ..BusRequest::default()
        }
    }

    #[test]
    fn d_cache_wins_simultaneous_ar_requests() {
        let mut arbiter = Arbiter::new();
        let m0 = ar_request(0x10);
        let m1 = ar_request(0x20);
        let slave = BusResponse {
            ar_ready: true,
            ..BusResponse::default()
        };

        let routed = arbiter.route_to_slave(m0, m1);
        assert_eq!(routed.ar.addr, 0x20, "D-Cache (m1) has priority");

        arbiter.commit(m0, m1, slave);
        assert_eq!(arbiter.state, State::ReadM1);
    }

    #[test]
    fn r_channel_locks_to_owning_master_until_handshake() {
        let mut arbiter = Arbiter::new();
        let m1 = ar_request(0x20);
        arbiter.commit(BusRequest::default(), m1, BusResponse { ar_ready: true, ..BusResponse::default() });
        assert_eq!(arbiter.state, State::ReadM1);

        let slave_r = BusResponse {
            r: RChannel {
                valid: true,
                ready: true,
                data: 0xABCD,
                resp: crate::bus::BusResp::Okay,
            },
            ..BusResponse::default()
        };
        let (m0_resp, m1_resp) = arbiter.route_to_masters(
            BusRequest::default(),
            BusRequest {
                r_ready: true,
                ..BusRequest::default()
            },
            slave_r,
        );
        assert!(!m0_resp.r.valid, "m0 must not observe m1's R data");
        assert_eq!(m1_resp.r.data, 0xABCD);

        arbiter.commit(
            BusRequest::default(),
            BusRequest {
                r_ready: true,
                ..BusRequest::default()
            },
            slave_r,
        );
        assert_eq!(arbiter.state, State::Idle);
    }

    #[test]
    fn i_cache_write_side_is_tied_off() {
        let arbiter = Arbiter::new();
        let (m0_resp, _) = arbiter.route_to_masters(
            BusRequest::default(),
            BusRequest::default(),
            BusResponse {
                aw_ready: true,
                w_ready: true,
                b: crate::bus::BChannel {
                    valid: true,
                    ready: true,
                    resp: crate::bus::BusResp::Okay,
                },
                ..BusResponse::default()
            },
        );
        assert!(!m0_resp.aw_ready);
        assert!(!m0_resp.w_ready);
        assert!(!m0_resp.b.valid);
    }

    #[test]
    fn ar_ready_reaches_granted_master_on_the_grant_cycle() {
        let arbiter = Arbiter::new();
        let m1 = ar_request(0x20);
        let (_, m1_resp) = arbiter.route_to_masters(
            BusRequest::default(),
            m1,
            BusResponse {
                ar_ready: true,
                ..BusResponse::default()
            },
        );
        assert!(
            m1_resp.ar_ready,
            "m1 must see ar_ready on the same cycle its AR is granted, while state is still Idle"
        );
    }
}
