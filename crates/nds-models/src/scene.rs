//! Scene definitions: the creative parameters of a drive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Road the drive follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    City,
    Coastal,
    Mountain,
    Tunnel,
}

impl Route {
    pub const ALL: &'static [Route] = &[Route::City, Route::Coastal, Route::Mountain, Route::Tunnel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::City => "city",
            Route::Coastal => "coastal",
            Route::Mountain => "mountain",
            Route::Tunnel => "tunnel",
        }
    }
}

/// Visual atmosphere of the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Vibe {
    Noir,
    #[default]
    Cyberpunk,
    Retro,
    Cinematic,
}

impl Vibe {
    pub const ALL: &'static [Vibe] = &[Vibe::Noir, Vibe::Cyberpunk, Vibe::Retro, Vibe::Cinematic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Noir => "noir",
            Vibe::Cyberpunk => "cyberpunk",
            Vibe::Retro => "retro",
            Vibe::Cinematic => "cinematic",
        }
    }

    /// Background gradient used by the front-end for this vibe.
    pub fn gradient(&self) -> &'static str {
        match self {
            Vibe::Noir => "from-gray-900 to-black",
            Vibe::Cyberpunk => "from-purple-900/50 to-cyan-900/50",
            Vibe::Retro => "from-orange-900/50 to-pink-900/50",
            Vibe::Cinematic => "from-blue-900/50 to-black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Clear,
    #[default]
    Rain,
    Fog,
}

impl Weather {
    pub const ALL: &'static [Weather] = &[Weather::Clear, Weather::Rain, Weather::Fog];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Fog => "fog",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        })*
    };
}

display_as_str!(Route, Vibe, Weather);

/// The live scene. Edits replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Scene {
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    #[validate(length(min = 1, max = 120))]
    pub name: String,

    pub route: Route,

    pub vibe: Vibe,

    pub weather: Weather,

    /// Free text, written by the user or by the text model
    #[validate(length(max = 4000))]
    pub description: String,
}

impl Scene {
    /// Copy of this scene with a different description.
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        crate::catalog::initial_scene()
    }
}
