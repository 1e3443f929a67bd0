use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use lumen_core::bits::{ffs, get_nibble};
use lumen_core::constants::{NIBBLE_BITS, NIBBLE_MASK, SLOTS_PER_WORD};
use lumen_core::error::SeqError;

use crate::codec;

/// Packed step history of one photon: up to 16 steps.
///
/// Bit layout (both words):
///   slot i -> bits [4*i, 4*i + 4), slot 0 is the earliest step
///   history  ffs(flag) & 0xF per step, 0 = no step recorded
///   auxcode  aux & 0xF per step (boundary or other per-step code)
///
/// The two words are the on-disk representation. Ordering is
/// lexicographic on `(history, auxcode)`, so sorting groups identical
/// histories together.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Pod,
    Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Sequence {
    pub history: u64,
    pub auxcode: u64,
}

impl Sequence {
    /// Number of slots in one sequence.
    pub const CAPACITY: usize = SLOTS_PER_WORD;

    /// Empty history, no steps recorded.
    pub const fn zero() -> Self {
        Self {
            history: 0,
            auxcode: 0,
        }
    }

    pub const fn from_words(history: u64, auxcode: u64) -> Self {
        Self { history, auxcode }
    }

    /// Record one step at `slot`.
    ///
    /// The slot must be empty: this ORs into the words. Slots are supplied
    /// by the caller's step counter, the codec does not track order.
    pub fn append(&mut self, slot: usize, flag: u32, aux: u32) -> Result<(), SeqError> {
        codec::append_step(&mut self.history, &mut self.auxcode, slot, flag, aux)
    }

    /// Rewrite the flag of an already recorded step, e.g. AB -> RE once a
    /// later step shows the absorbed photon was re-emitted.
    pub fn set_flag(&mut self, slot: usize, flag: u32) -> Result<(), SeqError> {
        codec::write_flag(&mut self.history, slot, flag)
    }

    /// Flag recorded at `slot`, `0` if never written.
    ///
    /// Flags at bit 15 and above were truncated on append and decode as a
    /// lower flag (or as `0`); the result is not corrected.
    pub fn flag_at(&self, slot: usize) -> Result<u32, SeqError> {
        codec::read_flag(self.history, slot)
    }

    /// Auxiliary nibble recorded at `slot`.
    pub fn aux_at(&self, slot: usize) -> Result<u8, SeqError> {
        get_nibble(self.auxcode, slot)
    }

    /// Count of leading recorded steps (stops at the first empty slot).
    pub fn num_steps(&self) -> usize {
        (0..Self::CAPACITY)
            .take_while(|&slot| (self.history >> (NIBBLE_BITS as usize * slot)) & NIBBLE_MASK != 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.history == 0
    }

    /// Whether appending `flag` would lose information to the nibble mask.
    pub fn is_truncated_flag(flag: u32) -> bool {
        codec::is_truncated(flag)
    }

    /// Full, unmasked find-first-set value of `flag`, for truncation reports.
    pub fn flag_ffs(flag: u32) -> u32 {
        ffs(flag)
    }

    /// Reinterpret a packed array of sequences as raw `u64` words
    /// (history, auxcode, history, auxcode, ...).
    pub fn as_words(seqs: &[Sequence]) -> &[u64] {
        bytemuck::cast_slice(seqs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Flag;

    fn round_trip_flags() -> impl Iterator<Item = Flag> {
        Flag::all().filter(|f| f.bit_pos() < 15)
    }

    #[test]
    fn test_zero() {
        let seq = Sequence::zero();
        assert_eq!((seq.history, seq.auxcode), (0, 0));
        assert_eq!(seq, Sequence::default());
        assert!(seq.is_empty());
        assert_eq!(seq.num_steps(), 0);
    }

    #[test]
    fn test_round_trip_every_flag_every_slot() {
        for flag in round_trip_flags() {
            for slot in 0..16 {
                let mut seq = Sequence::zero();
                seq.append(slot, flag.bits(), 0).expect("in range");
                assert_eq!(seq.flag_at(slot).expect("in range"), flag.bits());
                for other in (0..16).filter(|&o| o != slot) {
                    assert_eq!(seq.flag_at(other).expect("in range"), 0, "{flag:?} @ {slot}");
                }
            }
        }
    }

    #[test]
    fn test_non_interference_all_pairs() {
        let a = Flag::BoundaryTransmit.bits();
        let b = Flag::SurfaceDetect.bits();
        for i in 0..16 {
            for j in (0..16).filter(|&j| j != i) {
                let mut seq = Sequence::zero();
                seq.append(i, a, 3).expect("in range");
                seq.append(j, b, 5).expect("in range");
                assert_eq!(seq.flag_at(i).expect("in range"), a, "({i},{j})");
                assert_eq!(seq.flag_at(j).expect("in range"), b, "({i},{j})");
                assert_eq!(seq.aux_at(i).expect("in range"), 3);
                assert_eq!(seq.aux_at(j).expect("in range"), 5);
            }
        }
    }

    #[test]
    fn test_overwrite_any_pair() {
        for a in round_trip_flags() {
            for b in round_trip_flags() {
                let mut seq = Sequence::zero();
                seq.append(0, Flag::Torch.bits(), 0).expect("in range");
                seq.set_flag(4, a.bits()).expect("in range");
                seq.set_flag(4, b.bits()).expect("in range");
                assert_eq!(seq.flag_at(4).expect("in range"), b.bits(), "{a:?} -> {b:?}");
                assert_eq!(seq.flag_at(0).expect("in range"), Flag::Torch.bits());
            }
        }
    }

    #[test]
    fn test_overwrite_subset_bits() {
        // SR = nibble 10 (0b1010), BR = nibble 11 (0b1011): BR -> SR clears bit 0
        let mut seq = Sequence::zero();
        seq.append(2, Flag::BoundaryReflect.bits(), 0).expect("in range");
        seq.set_flag(2, Flag::SurfaceSreflect.bits()).expect("in range");
        assert_eq!(seq.flag_at(2).expect("in range"), Flag::SurfaceSreflect.bits());
    }

    #[test]
    fn test_reclassify_absorb_as_reemit() {
        let history = [
            Flag::Cerenkov,
            Flag::BoundaryTransmit,
            Flag::BulkAbsorb,
            Flag::BoundaryTransmit,
            Flag::SurfaceDetect,
        ];
        let mut seq = Sequence::zero();
        for (slot, flag) in history.iter().enumerate() {
            seq.append(slot, flag.bits(), 0).expect("in range");
        }
        for slot in 0..history.len() {
            if seq.flag_at(slot).expect("in range") == Flag::BulkAbsorb.bits() {
                seq.set_flag(slot, Flag::BulkReemit.bits()).expect("in range");
            }
        }
        assert_eq!(seq.flag_at(2).expect("in range"), Flag::BulkReemit.bits());
        assert_eq!(seq.flag_at(4).expect("in range"), Flag::SurfaceDetect.bits());
        assert_eq!(seq.num_steps(), 5);
    }

    #[test]
    fn test_high_flags_decode_ambiguously() {
        let mut seq = Sequence::zero();
        seq.append(0, Flag::Natural.bits(), 0).expect("in range");
        seq.append(1, Flag::DeferFstrackinfo.bits(), 0).expect("in range");
        seq.append(2, Flag::EfficiencyCull.bits(), 0).expect("in range");
        assert_eq!(seq.flag_at(0).expect("in range"), Flag::Cerenkov.bits());
        assert_eq!(seq.flag_at(1).expect("in range"), Flag::Scintillation.bits());
        assert_eq!(seq.flag_at(2).expect("in range"), 0);
        assert!(Sequence::is_truncated_flag(Flag::Natural.bits()));
        assert_eq!(Sequence::flag_ffs(Flag::Natural.bits()), 17);
    }

    #[test]
    fn test_aux_masked_to_nibble() {
        let mut seq = Sequence::zero();
        seq.append(1, Flag::Torch.bits(), 0x2A).expect("in range");
        assert_eq!(seq.aux_at(1).expect("in range"), 0xA);
        assert_eq!(seq.auxcode, 0xA0);
    }

    #[test]
    fn test_out_of_range_slots() {
        let mut seq = Sequence::zero();
        assert_eq!(
            seq.append(16, Flag::Torch.bits(), 0),
            Err(SeqError::OutOfRange {
                slot: 16,
                capacity: 16
            })
        );
        assert!(seq.set_flag(17, Flag::Torch.bits()).is_err());
        assert!(seq.flag_at(100).is_err());
        assert!(seq.aux_at(16).is_err());
        assert_eq!(seq, Sequence::zero());
    }

    #[test]
    fn test_equality_and_ordering() {
        let a = Sequence::from_words(0x1, 0x5);
        let b = Sequence::from_words(0x1, 0x5);
        let c = Sequence::from_words(0x1, 0x6);
        let d = Sequence::from_words(0x2, 0x0);
        assert_eq!(a, b);
        assert!(a < c);
        assert!(c < d);
        let mut v = vec![d, c, a];
        v.sort();
        assert_eq!(v, vec![a, c, d]);
    }

    #[test]
    fn test_as_words_layout() {
        assert_eq!(std::mem::size_of::<Sequence>(), 16);
        let seqs = [Sequence::from_words(1, 2), Sequence::from_words(3, 4)];
        assert_eq!(Sequence::as_words(&seqs), &[1u64, 2, 3, 4][..]);
    }

    #[test]
    fn test_serde_json() {
        let seq = Sequence::from_words(0xcccd, 0x21);
        let json = serde_json::to_string(&seq).expect("serialize");
        assert_eq!(json, r#"{"history":52429,"auxcode":33}"#);
        let back: Sequence = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, seq);
    }
}
