use glyphfold_core::InvalidInputPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Policy for stdin lines that are not valid UTF-8
    pub invalid_input: InvalidInputPolicy,
    /// Trim surrounding whitespace before normalizing
    pub trim: bool,
}

impl InputConfig {
    pub fn new() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let invalid_input = lookup("GLYPHFOLD_INVALID_INPUT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(); // replace with U+FFFD

        let trim = lookup("GLYPHFOLD_TRIM")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        InputConfig {
            invalid_input,
            trim,
        }
    }
}
