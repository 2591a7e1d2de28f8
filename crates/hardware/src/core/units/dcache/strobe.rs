//! Byte-strobe generation for partial stores.

use crate::core::cpu_if::Func3;

/// Computes the `WSTRB` mask for a store of the given width at the given
/// byte offset within a word.
///
/// Misaligned half/word stores (`sh` at offset 1 or 3, `sw` at a non-zero
/// offset) are undefined by the design; the producing pipeline must not
/// issue them. This returns `0` (no bytes written) for those inputs rather
/// than panicking.
#[must_use]
pub const fn strobe_for(func3: Func3, byte_offset: u32) -> u8 {
    match (func3, byte_offset) {
        (Func3::Byte, 0) => 0b0001,
        (Func3::Byte, 1) => 0b0010,
        (Func3::Byte, 2) => 0b0100,
        (Func3::Byte, 3) => 0b1000,
        (Func3::Half, 0) => 0b0011,
        (Func3::Half, 2) => 0b1100,
        (Func3::Word, 0) => 0b1111,
        _ => 0,
    }
}
