//! Studio tabs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which studio panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Scene configuration
    #[default]
    Dna,
    /// Moment library
    Moments,
    /// Render preview
    Preview,
    Publish,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Dna => "dna",
            Tab::Moments => "moments",
            Tab::Preview => "preview",
            Tab::Publish => "publish",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
