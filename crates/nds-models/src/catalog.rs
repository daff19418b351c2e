//! Static moment catalog, the initial scene, and catalog search.

use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::moment::{Moment, MomentCategory, MomentIcon, MomentId};
use crate::scene::{Route, Scene, Vibe, Weather};

/// The built-in moments, in display order.
pub fn moment_catalog() -> &'static [Moment] {
    static CATALOG: OnceLock<Vec<Moment>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            Moment::new(
                "m1",
                "Neon Flicker",
                "Passing a broken neon sign that flickers ominously.",
                3,
                MomentCategory::Visual,
            )
            .with_icon(MomentIcon::Zap),
            Moment::new(
                "m2",
                "Sudden Downpour",
                "Heavy rain suddenly hits the windshield.",
                5,
                MomentCategory::Visual,
            )
            .with_icon(MomentIcon::Rain),
            Moment::new(
                "m3",
                "Tunnel Entry",
                "Entering a brightly lit tunnel, sound changes.",
                8,
                MomentCategory::Action,
            )
            .with_icon(MomentIcon::Tunnel),
            Moment::new(
                "m4",
                "Retro Synth Swell",
                "Music swells with a nostalgic synthwave beat.",
                10,
                MomentCategory::Audio,
            )
            .with_icon(MomentIcon::Music),
            Moment::new(
                "m5",
                "Overtake",
                "Smoothly overtaking a slow moving truck.",
                4,
                MomentCategory::Action,
            )
            .with_icon(MomentIcon::Car),
            Moment::new(
                "m6",
                "Fog Bank",
                "Visibility drops as the car enters thick fog.",
                6,
                MomentCategory::Visual,
            )
            .with_icon(MomentIcon::Wind),
        ]
    })
}

/// Look up a catalog moment by ID.
pub fn find_moment(id: &MomentId) -> Option<&'static Moment> {
    moment_catalog().iter().find(|m| &m.id == id)
}

/// The scene a fresh studio session starts with.
pub fn initial_scene() -> Scene {
    Scene {
        id: "default-scene".to_string(),
        name: "Midnight Tokio Run".to_string(),
        route: Route::City,
        vibe: Vibe::Cyberpunk,
        weather: Weather::Rain,
        description:
            "A neon-soaked drive through a futuristic metropolis at 2 AM. Reflections on wet pavement."
                .to_string(),
    }
}

/// Library filter: moments whose title contains `query`, ignoring case.
pub fn search_moments(query: &str) -> Vec<&'static Moment> {
    let needle = query.to_lowercase();
    moment_catalog()
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

/// Actions offered by the command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaletteAction {
    GenerateVideo,
    SaveProject,
}

impl PaletteAction {
    pub const ALL: &'static [PaletteAction] =
        &[PaletteAction::GenerateVideo, PaletteAction::SaveProject];

    pub fn label(&self) -> &'static str {
        match self {
            PaletteAction::GenerateVideo => "Generate Video",
            PaletteAction::SaveProject => "Save Project",
        }
    }
}

/// One command palette row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandItem {
    Action { action: PaletteAction, label: String },
    Moment { moment: Moment },
}

/// Command palette search: matching actions first, then moments whose title
/// or description matches. Case-insensitive.
pub fn command_search(query: &str) -> Vec<CommandItem> {
    let needle = query.to_lowercase();

    let actions = PaletteAction::ALL
        .iter()
        .filter(|a| a.label().to_lowercase().contains(&needle))
        .map(|a| CommandItem::Action {
            action: *a,
            label: a.label().to_string(),
        });

    let moments = moment_catalog()
        .iter()
        .filter(|m| {
            m.title.to_lowercase().contains(&needle)
                || m.description.to_lowercase().contains(&needle)
        })
        .map(|m| CommandItem::Moment { moment: m.clone() });

    actions.chain(moments).collect()
}
