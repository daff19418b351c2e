//! Shared data models for NightDrive Studio.
//!
//! This crate provides Serde-serializable types for:
//! - The static moment catalog and its search
//! - Scenes (route, vibe, weather, description)
//! - Timeline assembly
//! - Production pack export

pub mod catalog;
pub mod moment;
pub mod pack;
pub mod scene;
pub mod tab;
pub mod timeline;

// Re-export common types
pub use catalog::{
    command_search, find_moment, initial_scene, moment_catalog, search_moments, CommandItem,
    PaletteAction,
};
pub use moment::{Moment, MomentCategory, MomentIcon, MomentId};
pub use pack::ProductionPack;
pub use scene::{Route, Scene, Vibe, Weather};
pub use tab::Tab;
pub use timeline::{InstanceId, Timeline, TimelineItem, TimelineSummary};
