//! Moment templates: the reusable narrative beats of a drive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a catalog moment (e.g. `m1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MomentId(pub String);

impl MomentId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MomentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MomentCategory {
    Visual,
    Action,
    Audio,
}

impl MomentCategory {
    pub const ALL: &'static [MomentCategory] = &[
        MomentCategory::Visual,
        MomentCategory::Action,
        MomentCategory::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MomentCategory::Visual => "visual",
            MomentCategory::Action => "action",
            MomentCategory::Audio => "audio",
        }
    }
}

impl fmt::Display for MomentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MomentCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(MomentCategory::Visual),
            "action" => Ok(MomentCategory::Action),
            "audio" => Ok(MomentCategory::Audio),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown moment category: {0}")]
pub struct CategoryParseError(String);

/// Display glyph tag. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MomentIcon {
    Zap,
    Rain,
    Tunnel,
    Music,
    Car,
    Wind,
    /// Fallback glyph for unknown tags
    #[default]
    #[serde(other)]
    Video,
}

impl MomentIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentIcon::Zap => "zap",
            MomentIcon::Rain => "rain",
            MomentIcon::Tunnel => "tunnel",
            MomentIcon::Music => "music",
            MomentIcon::Car => "car",
            MomentIcon::Wind => "wind",
            MomentIcon::Video => "video",
        }
    }
}

/// An immutable catalog entry describing one narrative beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Moment {
    /// Unique catalog ID
    pub id: MomentId,

    /// Short title shown on the card
    pub title: String,

    /// Prose fed into the video prompt
    pub description: String,

    /// Duration in whole seconds (always positive)
    pub duration: u32,

    /// Glyph tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MomentIcon>,

    pub category: MomentCategory,
}

impl Moment {
    /// Create a new moment.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        duration: u32,
        category: MomentCategory,
    ) -> Self {
        Self {
            id: MomentId::from_string(id),
            title: title.into(),
            description: description.into(),
            duration,
            icon: None,
            category,
        }
    }

    /// Set the display glyph.
    pub fn with_icon(mut self, icon: MomentIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Glyph to render, falling back to the generic video glyph.
    pub fn display_icon(&self) -> MomentIcon {
        self.icon.unwrap_or_default()
    }
}
