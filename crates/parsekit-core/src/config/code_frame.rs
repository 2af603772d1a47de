//! Code frame rendering configuration.

use serde::{Deserialize, Serialize};

/// Controls how much source context surrounds a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFrameConfig {
    /// Context lines shown above the first offending line.
    #[serde(default = "default_lines_above")]
    pub lines_above: usize,
    /// Context lines shown below the last offending line.
    #[serde(default = "default_lines_below")]
    pub lines_below: usize,
}

impl Default for CodeFrameConfig {
    fn default() -> Self {
        Self {
            lines_above: default_lines_above(),
            lines_below: default_lines_below(),
        }
    }
}

fn default_lines_above() -> usize {
    2
}

fn default_lines_below() -> usize {
    3
}
