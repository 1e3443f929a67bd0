//! Find-first-set nibble codec for a single history word.
//!
//! A flag is stored as `ffs(flag) & 0xF`. The mask is the truncation point:
//! flags at bit 15 and above wrap onto lower nibble values
//! (bit 15 -> 0, bit 16 -> 1, bit 17 -> 2). The wrap is part of the wire
//! layout and must stay bit-for-bit reproducible, so it is never corrected.

use lumen_core::bits::{ffs, get_nibble, set_nibble, slot_shift};
use lumen_core::constants::NIBBLE_MASK;
use lumen_core::error::SeqError;

/// Nibble stored for `flag`, after truncation to 4 bits.
pub fn flag_nibble(flag: u32) -> u64 {
    u64::from(ffs(flag)) & NIBBLE_MASK
}

/// Flag value decoded from a stored nibble. `0` decodes to the zero sentinel.
///
/// Exact inverse of [`flag_nibble`] only for flags below bit 15.
pub fn nibble_flag(nibble: u8) -> u32 {
    match nibble & NIBBLE_MASK as u8 {
        0 => 0,
        n => 0x1 << (n - 1),
    }
}

/// True when storing `flag` loses information to the 4-bit mask.
pub fn is_truncated(flag: u32) -> bool {
    u64::from(ffs(flag)) & NIBBLE_MASK != u64::from(ffs(flag))
}

/// Append-style write: OR the step into a slot presumed empty.
///
/// Matches the recording loop, which writes each slot once in order.
/// Writing onto a populated slot merges bits; use [`write_flag`] to rewrite.
pub fn append_step(
    history: &mut u64,
    auxcode: &mut u64,
    slot: usize,
    flag: u32,
    aux: u32,
) -> Result<(), SeqError> {
    let shift = slot_shift(slot)?;
    if is_truncated(flag) {
        log::debug!(
            "flag {flag:#x} truncates to nibble {} at slot {slot}",
            flag_nibble(flag)
        );
    }
    if (*history >> shift) & NIBBLE_MASK != 0 {
        log::debug!("append onto populated slot {slot}, history {:#018x}", *history);
    }
    *history |= flag_nibble(flag) << shift;
    *auxcode |= (u64::from(aux) & NIBBLE_MASK) << shift;
    Ok(())
}

/// Rewrite the flag at `slot`, clearing the old nibble first.
pub fn write_flag(history: &mut u64, slot: usize, flag: u32) -> Result<(), SeqError> {
    set_nibble(history, slot, flag_nibble(flag))
}

/// Decode the flag at `slot`.
pub fn read_flag(history: u64, slot: usize) -> Result<u32, SeqError> {
    get_nibble(history, slot).map(nibble_flag)
}
