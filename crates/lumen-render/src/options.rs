use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse render options RON: {0}")]
    ParseError(String),
}

fn default_abbrev() -> bool {
    true
}

fn default_delimiter() -> String {
    " ".into()
}

/// Display settings for history dumps, loaded from RON.
///
/// Every field is optional in the RON source:
///
/// ```text
/// (abbrev: false, highlight: Some(3), trim_trailing_zero: true)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Two-letter abbreviations (true) or full flag names (false).
    #[serde(default = "default_abbrev")]
    pub abbrev: bool,
    /// Slot to wrap in brackets.
    #[serde(default)]
    pub highlight: Option<usize>,
    /// Separator between steps.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Stop at the first empty slot instead of rendering all 16.
    #[serde(default)]
    pub trim_trailing_zero: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            abbrev: default_abbrev(),
            highlight: None,
            delimiter: default_delimiter(),
            trim_trailing_zero: false,
        }
    }
}

impl RenderOptions {
    /// Parse options from a RON string.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
