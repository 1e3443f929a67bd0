use lumen_core::bits::get_nibble;
use lumen_core::constants::SLOTS_PER_WORD;
use lumen_core::error::SeqError;

use crate::codec;
use crate::sequence::Sequence;

/// Step history spread over `N` packed words, capacity `16 * N` steps.
///
/// Global slot `s` lives in word `s / 16`, nibble `s % 16`. Each word has
/// exactly the single-word [`Sequence`] layout, so `SeqWords<1>` and
/// `Sequence` convert losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqWords<const N: usize> {
    pub history: [u64; N],
    pub auxcode: [u64; N],
}

impl<const N: usize> Default for SeqWords<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> SeqWords<N> {
    pub const CAPACITY: usize = N * SLOTS_PER_WORD;

    pub const fn zero() -> Self {
        Self {
            history: [0; N],
            auxcode: [0; N],
        }
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    /// Split a global slot into (word index, slot within word).
    fn locate(slot: usize) -> Result<(usize, usize), SeqError> {
        if slot >= Self::CAPACITY {
            return Err(SeqError::OutOfRange {
                slot,
                capacity: Self::CAPACITY,
            });
        }
        Ok((slot / SLOTS_PER_WORD, slot % SLOTS_PER_WORD))
    }

    pub fn append(&mut self, slot: usize, flag: u32, aux: u32) -> Result<(), SeqError> {
        let (word, local) = Self::locate(slot)?;
        codec::append_step(
            &mut self.history[word],
            &mut self.auxcode[word],
            local,
            flag,
            aux,
        )
    }

    pub fn set_flag(&mut self, slot: usize, flag: u32) -> Result<(), SeqError> {
        let (word, local) = Self::locate(slot)?;
        codec::write_flag(&mut self.history[word], local, flag)
    }

    pub fn flag_at(&self, slot: usize) -> Result<u32, SeqError> {
        let (word, local) = Self::locate(slot)?;
        codec::read_flag(self.history[word], local)
    }

    pub fn aux_at(&self, slot: usize) -> Result<u8, SeqError> {
        let (word, local) = Self::locate(slot)?;
        get_nibble(self.auxcode[word], local)
    }

    /// The `i`-th word as a single-word sequence.
    pub fn word(&self, i: usize) -> Option<Sequence> {
        Some(Sequence::from_words(
            *self.history.get(i)?,
            *self.auxcode.get(i)?,
        ))
    }

    pub fn history_words(&self) -> &[u64] {
        &self.history
    }
}

impl From<Sequence> for SeqWords<1> {
    fn from(seq: Sequence) -> Self {
        Self {
            history: [seq.history],
            auxcode: [seq.auxcode],
        }
    }
}

impl From<SeqWords<1>> for Sequence {
    fn from(words: SeqWords<1>) -> Self {
        Sequence::from_words(words.history[0], words.auxcode[0])
    }
}
