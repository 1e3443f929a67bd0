//! Build sequences from abbreviation text, e.g. `"TO BT BT SD"`.
//!
//! Used by validation tooling to write expected histories by hand and
//! compare them against recorded ones.

use lumen_core::error::SeqError;
use lumen_core::Flag;

use crate::sequence::Sequence;

fn lookup(abbrev: &str) -> Result<Flag, SeqError> {
    Flag::from_abbrev(abbrev).ok_or_else(|| SeqError::UnknownAbbrev(abbrev.into()))
}

impl Sequence {
    /// Parse a delimited abbreviation sequence into a history (auxcode zero).
    ///
    /// Empty tokens are skipped. More than 16 steps is `OutOfRange`.
    pub fn from_abbrevs(text: &str, delim: char) -> Result<Self, SeqError> {
        let mut seq = Sequence::zero();
        let tokens = text.split(delim).map(str::trim).filter(|t| !t.is_empty());
        for (slot, token) in tokens.enumerate() {
            seq.append(slot, lookup(token)?.bits(), 0)?;
        }
        Ok(seq)
    }

    /// Parse whitespace-separated `ABBREV:AUX` pairs, e.g. `"TO:0 BT:3 SD:7"`.
    ///
    /// AUX is decimal and stored masked to a nibble.
    pub fn from_abbrev_pairs(text: &str) -> Result<Self, SeqError> {
        let mut seq = Sequence::zero();
        for (slot, token) in text.split_whitespace().enumerate() {
            let (abbrev, aux) = token
                .split_once(':')
                .ok_or_else(|| SeqError::MalformedToken(token.into()))?;
            let aux: u32 = aux
                .parse()
                .map_err(|_| SeqError::MalformedToken(token.into()))?;
            seq.append(slot, lookup(abbrev)?.bits(), aux)?;
        }
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_abbrevs() {
        let seq = Sequence::from_abbrevs("TO BT BT SD", ' ').expect("valid");
        assert_eq!(seq.num_steps(), 4);
        assert_eq!(seq.flag_at(0).expect("in range"), Flag::Torch.bits());
        assert_eq!(seq.flag_at(3).expect("in range"), Flag::SurfaceDetect.bits());
        // TO=0xd BT=0xc SD=0x7
        assert_eq!(seq.history, 0x7ccd);
    }

    #[test]
    fn test_from_abbrevs_other_delim() {
        let a = Sequence::from_abbrevs("TO,BT,SA", ',').expect("valid");
        let b = Sequence::from_abbrevs("TO BT  SA ", ' ').expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_abbrevs_unknown() {
        assert_eq!(
            Sequence::from_abbrevs("TO ZZ", ' '),
            Err(SeqError::UnknownAbbrev("ZZ".into()))
        );
    }

    #[test]
    fn test_from_abbrevs_too_long() {
        let text = vec!["BT"; 17].join(" ");
        assert!(matches!(
            Sequence::from_abbrevs(&text, ' '),
            Err(SeqError::OutOfRange { slot: 16, .. })
        ));
    }

    #[test]
    fn test_from_abbrev_pairs() {
        let seq = Sequence::from_abbrev_pairs("TO:0 BT:3 SD:7").expect("valid");
        assert_eq!(seq.history, 0x7cd);
        assert_eq!(seq.auxcode, 0x730);
        assert_eq!(seq.aux_at(2).expect("in range"), 7);
    }

    #[test]
    fn test_from_abbrev_pairs_malformed() {
        assert_eq!(
            Sequence::from_abbrev_pairs("TO:0 BT"),
            Err(SeqError::MalformedToken("BT".into()))
        );
        assert_eq!(
            Sequence::from_abbrev_pairs("TO:x"),
            Err(SeqError::MalformedToken("TO:x".into()))
        );
    }
}
