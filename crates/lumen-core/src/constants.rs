//! Single source of truth for the packed history layout.
//! These values define the on-disk bit layout of history words, so any
//! change here breaks comparison against histories recorded elsewhere.

/// Bits used to store one step in a history or auxcode word.
pub const NIBBLE_BITS: u32 = 4;

/// Mask selecting a single nibble value (low 4 bits).
pub const NIBBLE_MASK: u64 = 0xF;

/// Bits in one packed word.
pub const WORD_BITS: u32 = 64;

/// Steps recorded per 64-bit word (64 / 4).
pub const SLOTS_PER_WORD: usize = (WORD_BITS / NIBBLE_BITS) as usize;

/// Highest flag bit position whose find-first-set value fits in a nibble
/// without wrapping. Flags at or above this position truncate on append.
pub const FIRST_TRUNCATED_BIT: u32 = 15;

/// Machinery sentinel one past the highest enumerated flag (1 << 18).
pub const MACHINERY: u32 = 0x1 << 18;

/// Highest enumerated flag bit position, derived from the machinery sentinel.
pub const LAST_BIT: u32 = MACHINERY.trailing_zeros() - 1;

/// Name rendered for a slot that was never written.
pub const ZERO_NAME: &str = ".";

/// Abbreviation rendered for a slot that was never written.
pub const ZERO_ABBREV: &str = "  ";

/// Name rendered for a bit pattern that matches no enumerated flag.
pub const BAD_FLAG_NAME: &str = "BAD_FLAG";

/// Abbreviation rendered for a bit pattern that matches no enumerated flag.
pub const BAD_FLAG_ABBREV: &str = "XX";
