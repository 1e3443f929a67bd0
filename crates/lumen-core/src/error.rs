use thiserror::Error;

/// Errors surfaced by history encoding.
///
/// Only caller mistakes are errors. Decoding an unrecognized bit pattern
/// never fails; it renders as the bad-flag label instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error("slot {slot} out of range (capacity {capacity})")]
    OutOfRange { slot: usize, capacity: usize },

    #[error("unknown flag abbreviation '{0}'")]
    UnknownAbbrev(String),

    #[error("malformed step token '{0}' (expected ABBREV:AUX)")]
    MalformedToken(String),
}
