//! End-to-end scenarios driving a full `System` rather than one controller.

use rv_memsys_core::common::{DEFAULT_MMIO_BASE, HANG_DETECTION_THRESHOLD};
use rv_memsys_core::core::{DataRequest, Func3, IFetchRequest};
use rv_memsys_core::soc::{MemorySlave, System};

use crate::common::harness::{run_data, run_fetch, run_store};

fn system_with_words(words: &[u32]) -> System {
    let mut slave = MemorySlave::new(1 << 16);
    slave.load_image(0, words).unwrap();
    System::new(slave, DEFAULT_MMIO_BASE)
}

fn fetch(addr: u32) -> IFetchRequest {
    IFetchRequest {
        cpu_req: true,
        cpu_addr: addr,
    }
}

fn load(addr: u32) -> DataRequest {
    DataRequest {
        cpu_req: true,
        cpu_addr: addr,
        cpu_we: false,
        cpu_wdata: 0,
        cpu_func3: Func3::Word,
    }
}

fn store(addr: u32, data: u32, width: Func3) -> DataRequest {
    DataRequest {
        cpu_req: true,
        cpu_addr: addr,
        cpu_we: true,
        cpu_wdata: data,
        cpu_func3: width,
    }
}

#[test]
fn icache_cold_miss_then_hit_within_the_same_line() {
    let mut system = system_with_words(&[0x1111_1111, 0x2222_2222, 0x3333_3333, 0x4444_4444]);

    let resp = run_fetch(&mut system, fetch(0x100), HANG_DETECTION_THRESHOLD);
    assert_eq!(resp.cpu_data, 0x1111_1111);
    assert_eq!(system.icache.stats.misses, 1);
    assert_eq!(system.icache.stats.refills, 1);

    let (resp, _) = system.step(fetch(0x104), DataRequest::default());
    assert!(!resp.cpu_stall, "second word of a refilled line hits with zero stall");
    assert_eq!(resp.cpu_data, 0x2222_2222);
    assert_eq!(system.icache.stats.hits, 1);
}

#[test]
fn dcache_write_through_word_store_is_visible_to_a_later_load() {
    let mut system = system_with_words(&[0; 8]);

    run_store(&mut system, store(0x200, 0xDEAD_BEEF, Func3::Word), HANG_DETECTION_THRESHOLD);
    assert_eq!(system.dcache.write_throughs, 1);

    system.reset();
    let resp = run_data(&mut system, load(0x200), HANG_DETECTION_THRESHOLD);
    assert_eq!(resp.cpu_data, 0xDEAD_BEEF, "write-through value must be durable in backing memory");
}

#[test]
fn partial_store_widths_mask_only_their_own_bytes() {
    let mut system = system_with_words(&[0xFFFF_FFFF, 0, 0, 0]);

    run_store(&mut system, store(0x0, 0x0000_00AB, Func3::Byte), HANG_DETECTION_THRESHOLD);
    assert_eq!(system.slave.read_word(0).unwrap(), 0xFFFF_FFAB);

    system.reset();
    run_store(&mut system, store(0x0, 0x0000_BEEF, Func3::Half), HANG_DETECTION_THRESHOLD);
    assert_eq!(system.slave.read_word(0).unwrap(), 0xFFFF_BEEF);

    system.reset();
    run_store(&mut system, store(0x0, 0xCAFE_BABE, Func3::Word), HANG_DETECTION_THRESHOLD);
    assert_eq!(system.slave.read_word(0).unwrap(), 0xCAFE_BABE);
}

#[test]
fn mmio_read_bypass_serves_two_sequential_side_effecting_reads() {
    let mut system = system_with_words(&[0; 4]);
    let mmio_addr = DEFAULT_MMIO_BASE + 4;
    system.slave.write_word(1, 0xAAAA_AAAA).unwrap();

    let first = run_data(&mut system, load(mmio_addr), HANG_DETECTION_THRESHOLD);
    assert_eq!(first.cpu_data, 0xAAAA_AAAA);
    assert_eq!(system.dcache.mmio_reads, 1);

    system.slave.write_word(1, 0xBBBB_BBBB).unwrap();
    system.dcache.reset();
    let second = run_data(&mut system, load(mmio_addr), HANG_DETECTION_THRESHOLD);
    assert_eq!(second.cpu_data, 0xBBBB_BBBB, "mmio reads are not cached across requests");
    assert_eq!(system.dcache.mmio_reads, 1, "dcache.reset() clears counters too");
}

#[test]
fn arbiter_grants_dcache_over_icache_on_simultaneous_ar() {
    let mut system = system_with_words(&[0; 256]);
    // Word 64 (byte 0x100) and word 128 (byte 0x200) fall in different lines,
    // so the two caches miss independently and genuinely contend for the bus.
    system.slave.write_word(64, 0x1111_1111).unwrap();
    system.slave.write_word(128, 0x2222_2222).unwrap();

    let i_req = fetch(0x100);
    let d_req = load(0x200);

    let mut i_done_at = None;
    let mut d_done_at = None;
    for cycle in 0..HANG_DETECTION_THRESHOLD {
        let (i_resp, d_resp) = system.step(i_req, d_req);
        if i_done_at.is_none() && !i_resp.cpu_stall {
            i_done_at = Some(cycle);
        }
        if d_done_at.is_none() && !d_resp.cpu_stall {
            d_done_at = Some(cycle);
        }
        if i_done_at.is_some() && d_done_at.is_some() {
            break;
        }
    }

    let i_done_at = i_done_at.expect("fetch must eventually complete");
    let d_done_at = d_done_at.expect("load must eventually complete");
    assert!(
        d_done_at < i_done_at,
        "on simultaneous contention the D-Cache has fixed priority and must finish its refill first"
    );
}

#[test]
fn store_miss_does_not_install_a_line() {
    let mut system = system_with_words(&[0; 256]);

    run_store(&mut system, store(0x300, 0x1234_5678, Func3::Word), HANG_DETECTION_THRESHOLD);

    let resp = run_data(&mut system, load(0x300), HANG_DETECTION_THRESHOLD);
    assert_eq!(
        system.dcache.stats.misses, 1,
        "the preceding store must not have installed a line, so this load still misses"
    );
    assert_eq!(resp.cpu_data, 0x1234_5678, "the stored value is still visible via backing memory");
}
