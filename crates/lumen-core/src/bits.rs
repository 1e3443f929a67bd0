//! Bit primitives for nibble-packed history words.
//!
//! Pure functions, no state. These define the wire layout of a history
//! word: slot `i` occupies bits `[4*i, 4*i + 4)`.

use crate::constants::{NIBBLE_BITS, NIBBLE_MASK, SLOTS_PER_WORD};
use crate::error::SeqError;

/// 1-based position of the lowest set bit, or 0 when `x == 0`.
///
/// Not masked to a nibble: a flag at bit 15 returns 16, bit 17 returns 18.
/// Callers that store the result apply `NIBBLE_MASK` themselves.
pub fn ffs(x: u32) -> u32 {
    if x == 0 {
        0
    } else {
        x.trailing_zeros() + 1
    }
}

/// 64-bit variant of [`ffs`].
pub fn ffs_u64(x: u64) -> u32 {
    if x == 0 {
        0
    } else {
        x.trailing_zeros() + 1
    }
}

/// Inverse of [`ffs`]: `0 -> 0`, `n -> 1 << (n - 1)`. Values past 64 give 0.
pub fn rffs(n: u32) -> u64 {
    match n {
        0 => 0,
        _ => 1u64.checked_shl(n - 1).unwrap_or(0),
    }
}

/// Bit shift of `slot` within a single word, rejecting slots past the word.
pub fn slot_shift(slot: usize) -> Result<u32, SeqError> {
    if slot >= SLOTS_PER_WORD {
        return Err(SeqError::OutOfRange {
            slot,
            capacity: SLOTS_PER_WORD,
        });
    }
    Ok(slot as u32 * NIBBLE_BITS)
}

/// Read the nibble at `slot`.
pub fn get_nibble(word: u64, slot: usize) -> Result<u8, SeqError> {
    let shift = slot_shift(slot)?;
    Ok(((word >> shift) & NIBBLE_MASK) as u8)
}

/// Zero the nibble at `slot`, leaving every other slot untouched.
pub fn clear_nibble(word: &mut u64, slot: usize) -> Result<(), SeqError> {
    let shift = slot_shift(slot)?;
    *word &= !(NIBBLE_MASK << shift);
    Ok(())
}

/// Overwrite the nibble at `slot` with the low 4 bits of `value`.
///
/// Clears before OR-ing, so it is safe on an already-populated slot.
pub fn set_nibble(word: &mut u64, slot: usize, value: u64) -> Result<(), SeqError> {
    let shift = slot_shift(slot)?;
    *word = (*word & !(NIBBLE_MASK << shift)) | ((value & NIBBLE_MASK) << shift);
    Ok(())
}
