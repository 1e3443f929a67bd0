use serde::{Deserialize, Serialize};

use crate::constants::LAST_BIT;
use crate::error::SeqError;
use crate::flag::Flag;

/// OR-combination of flags, e.g. every outcome seen across a run.
///
/// A set, not an ordered history. Bits outside the enumerated range are
/// kept but never yielded by [`FlagMask::iter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagMask(pub u32);

impl FlagMask {
    pub const EMPTY: FlagMask = FlagMask(0);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, flag: Flag) {
        self.0 |= flag.bits();
    }

    pub fn contains(self, flag: Flag) -> bool {
        self.0 & flag.bits() != 0
    }

    /// Enumerated flags present, ascending bit position `0..=LAST_BIT`.
    pub fn iter(self) -> impl Iterator<Item = Flag> {
        (0..=LAST_BIT)
            .filter(move |pos| self.0 & (1u32 << *pos) != 0)
            .filter_map(Flag::from_bit_pos)
    }

    /// Build a mask from delimited abbreviations, e.g. `"TO,BT,SD"` with `','`.
    ///
    /// Empty tokens are skipped; an unknown abbreviation is an error.
    pub fn from_abbrevs(list: &str, delim: char) -> Result<FlagMask, SeqError> {
        let mut mask = FlagMask::EMPTY;
        for token in list.split(delim).map(str::trim).filter(|t| !t.is_empty()) {
            let flag =
                Flag::from_abbrev(token).ok_or_else(|| SeqError::UnknownAbbrev(token.into()))?;
            mask.insert(flag);
        }
        Ok(mask)
    }
}

impl From<Flag> for FlagMask {
    fn from(flag: Flag) -> Self {
        FlagMask(flag.bits())
    }
}

impl FromIterator<Flag> for FlagMask {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut mask = FlagMask::EMPTY;
        for flag in iter {
            mask.insert(flag);
        }
        mask
    }
}

impl std::ops::BitOr<Flag> for FlagMask {
    type Output = FlagMask;

    fn bitor(self, rhs: Flag) -> FlagMask {
        FlagMask(self.0 | rhs.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_contains() {
        let mut mask = FlagMask::EMPTY;
        assert!(mask.is_empty());
        mask.insert(Flag::BulkAbsorb);
        assert!(mask.contains(Flag::BulkAbsorb));
        assert!(!mask.contains(Flag::SurfaceDetect));
    }

    #[test]
    fn test_iter_ascending() {
        let mask: FlagMask = [Flag::SurfaceDetect, Flag::Cerenkov, Flag::Torch]
            .into_iter()
            .collect();
        let flags: Vec<_> = mask.iter().collect();
        assert_eq!(flags, vec![Flag::Cerenkov, Flag::SurfaceDetect, Flag::Torch]);
    }

    #[test]
    fn test_iter_skips_unenumerated_bits() {
        let mask = FlagMask((1 << 18) | (1 << 31) | Flag::Miss.bits());
        let flags: Vec<_> = mask.iter().collect();
        assert_eq!(flags, vec![Flag::Miss]);
    }

    #[test]
    fn test_iter_includes_last_bit() {
        let mask = FlagMask::from(Flag::DeferFstrackinfo);
        assert_eq!(mask.iter().count(), 1);
    }

    #[test]
    fn test_from_abbrevs() {
        let mask = FlagMask::from_abbrevs("TO,BT, SD", ',').expect("valid abbrevs");
        assert_eq!(
            mask,
            FlagMask::from(Flag::Torch) | Flag::BoundaryTransmit | Flag::SurfaceDetect
        );
        assert_eq!(
            FlagMask::from_abbrevs("", ',').expect("empty is fine"),
            FlagMask::EMPTY
        );
    }

    #[test]
    fn test_from_abbrevs_unknown() {
        let err = FlagMask::from_abbrevs("TO QQ", ' ').expect_err("QQ is not a flag");
        assert_eq!(err, SeqError::UnknownAbbrev("QQ".into()));
    }
}
