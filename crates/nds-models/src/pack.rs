//! Production pack export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::timeline::Timeline;

/// Scene and timeline bundled for export. There is no import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProductionPack {
    pub scene: Scene,
    pub timeline: Timeline,
}

impl ProductionPack {
    pub fn new(scene: Scene, timeline: Timeline) -> Self {
        Self { scene, timeline }
    }

    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{initial_scene, moment_catalog};

    #[test]
    fn test_pack_document_shape() {
        let mut timeline = Timeline::new();
        timeline.append(&moment_catalog()[0]);
        timeline.append(&moment_catalog()[2]);

        let pack = ProductionPack::new(initial_scene(), timeline);
        let text = pack.to_json_pretty().unwrap();
        assert!(text.contains('\n'));

        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["scene"]["name"], "Midnight Tokio Run");
        assert_eq!(doc["timeline"][1]["title"], "Tunnel Entry");
        assert_eq!(doc["timeline"][1]["startTime"], 3);
    }
}
