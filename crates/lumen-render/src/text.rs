//! Human-readable rendering of packed histories and flag masks.
//!
//! Rendering never fails on data: unrecognized bit patterns render as the
//! bad-flag label so tooling can dump old or foreign arrays.

use lumen_core::constants::SLOTS_PER_WORD;
use lumen_core::error::SeqError;
use lumen_core::flag::{abbrev_of, name_of};
use lumen_core::FlagMask;
use lumen_seq::codec::read_flag;
use lumen_seq::Sequence;

use crate::options::RenderOptions;

/// Name or abbreviation of a raw flag value.
pub fn render_flag(flag: u32, abbrev: bool) -> &'static str {
    if abbrev {
        abbrev_of(flag)
    } else {
        name_of(flag)
    }
}

fn render_tokens(
    words: &[u64],
    num_slots: usize,
    abbrev: bool,
    highlight: Option<usize>,
    delimiter: &str,
) -> String {
    let limit = num_slots.min(words.len() * SLOTS_PER_WORD);
    if limit < num_slots {
        log::warn!(
            "requested {num_slots} slots but only {} words supplied, rendering {limit}",
            words.len()
        );
    }
    let mut tokens = Vec::with_capacity(limit);
    for slot in 0..limit {
        let word = words[slot / SLOTS_PER_WORD];
        // local slot is < 16 by construction
        let flag = read_flag(word, slot % SLOTS_PER_WORD).unwrap_or_default();
        let label = render_flag(flag, abbrev);
        if highlight == Some(slot) {
            tokens.push(format!("[{label}]"));
        } else {
            tokens.push(label.to_string());
        }
    }
    tokens.join(delimiter)
}

/// Render the first `num_slots` steps of a history spread over `words`.
///
/// Slot `s` is read from word `s / 16`. Steps are space-joined; the step
/// at `highlight` (a global slot index) is wrapped in `[` `]`.
pub fn render_words(
    words: &[u64],
    num_slots: usize,
    abbrev: bool,
    highlight: Option<usize>,
) -> String {
    render_tokens(words, num_slots, abbrev, highlight, " ")
}

/// Render the first `num_slots` (at most 16) steps of a single sequence.
pub fn render_sequence(
    seq: &Sequence,
    num_slots: usize,
    abbrev: bool,
    highlight: Option<usize>,
) -> String {
    render_words(&[seq.history], num_slots, abbrev, highlight)
}

/// Render with loaded options. `trim_trailing_zero` stops at the first
/// empty slot instead of showing all 16.
pub fn render_with(seq: &Sequence, options: &RenderOptions) -> String {
    let num_slots = if options.trim_trailing_zero {
        seq.num_steps()
    } else {
        Sequence::CAPACITY
    };
    render_tokens(
        &[seq.history],
        num_slots,
        options.abbrev,
        options.highlight,
        &options.delimiter,
    )
}

/// Label an OR-combination of flags, e.g. `AB|SD`.
///
/// Bits are scanned in ascending position up to the last enumerated flag;
/// bits matching no flag are skipped, not rendered as bad flags.
pub fn mask_label(mask: u32, abbrev: bool) -> String {
    FlagMask(mask)
        .iter()
        .map(|flag| if abbrev { flag.abbrev() } else { flag.name() })
        .collect::<Vec<_>>()
        .join("|")
}

/// Abbreviation of the step at `slot` of a history word.
pub fn point_abbrev(history: u64, slot: usize) -> Result<&'static str, SeqError> {
    read_flag(history, slot).map(abbrev_of)
}

/// One-line debug dump: both words in hex, then the trimmed step sequence.
pub fn describe(seq: &Sequence) -> String {
    format!(
        "{:016x} {:016x} {}",
        seq.history,
        seq.auxcode,
        render_sequence(seq, seq.num_steps(), true, None)
    )
}
