use std::path::PathBuf;

use lumen_core::error::SeqError;
use lumen_seq::Sequence;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArgError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid {flag} value '{value}'")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown argument: {0}")]
    Unknown(String),
    #[error(transparent)]
    Sequence(#[from] SeqError),
}

/// Parsed command line for `seqhis`.
#[derive(Debug, Default)]
pub struct Args {
    pub sequences: Vec<Sequence>,
    pub masks: Vec<u32>,
    pub names: bool,
    pub highlight: Option<usize>,
    pub config_path: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
}

pub const USAGE: &str = "\
Usage: seqhis [OPTIONS]
  --hex <history[:auxcode]>   Decode a packed history word (hex, repeatable)
  --abbrev-seq <\"TO BT SD\">   Encode then decode an abbreviation sequence
  --pairs <\"TO:0 BT:3\">       Encode abbreviation:aux pairs
  --mask <value>              Label a flag mask (hex with 0x, or decimal)
  --names                     Full flag names instead of abbreviations
  --highlight <slot>          Bracket one slot
  --config <path.ron>         Load render options from RON
  --json                      Emit JSON instead of a table";

/// Parse `0x`-prefixed hex or plain hex digits.
pub fn parse_hex_u64(text: &str) -> Option<u64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16).ok()
}

/// Parse `history` or `history:auxcode`, both hex.
pub fn parse_hex_sequence(text: &str) -> Option<Sequence> {
    match text.split_once(':') {
        Some((history, auxcode)) => Some(Sequence::from_words(
            parse_hex_u64(history)?,
            parse_hex_u64(auxcode)?,
        )),
        None => Some(Sequence::from_words(parse_hex_u64(text)?, 0)),
    }
}

/// Parse a mask: `0x` prefix means hex, otherwise decimal.
pub fn parse_mask(text: &str) -> Option<u32> {
    match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Args, ArgError> {
        let mut parsed = Args::default();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--hex" => {
                    let value = iter.next().ok_or(ArgError::MissingValue("--hex"))?;
                    let seq = parse_hex_sequence(&value).ok_or(ArgError::InvalidValue {
                        flag: "--hex",
                        value,
                    })?;
                    parsed.sequences.push(seq);
                }
                "--abbrev-seq" => {
                    let value = iter.next().ok_or(ArgError::MissingValue("--abbrev-seq"))?;
                    parsed.sequences.push(Sequence::from_abbrevs(&value, ' ')?);
                }
                "--pairs" => {
                    let value = iter.next().ok_or(ArgError::MissingValue("--pairs"))?;
                    parsed.sequences.push(Sequence::from_abbrev_pairs(&value)?);
                }
                "--mask" => {
                    let value = iter.next().ok_or(ArgError::MissingValue("--mask"))?;
                    let mask = parse_mask(&value).ok_or(ArgError::InvalidValue {
                        flag: "--mask",
                        value,
                    })?;
                    parsed.masks.push(mask);
                }
                "--highlight" => {
                    let value = iter.next().ok_or(ArgError::MissingValue("--highlight"))?;
                    let slot = value.parse().map_err(|_| ArgError::InvalidValue {
                        flag: "--highlight",
                        value,
                    })?;
                    parsed.highlight = Some(slot);
                }
                "--config" => {
                    let value = iter.next().ok_or(ArgError::MissingValue("--config"))?;
                    parsed.config_path = Some(PathBuf::from(value));
                }
                "--names" => parsed.names = true,
                "--json" => parsed.json = true,
                "--help" | "-h" => parsed.help = true,
                other => return Err(ArgError::Unknown(other.to_string())),
            }
        }

        Ok(parsed)
    }
}
