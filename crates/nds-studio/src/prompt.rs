//! Prompt construction for the text and video models.

use nds_models::{Scene, Timeline};

/// Joins consecutive timeline beats in the video prompt.
pub const EVENT_CONNECTIVE: &str = ", then ";

/// Instruction for the text model to write a scene description.
pub fn build_description_prompt(scene: &Scene) -> String {
    format!(
        "Describe a cinematic night drive scene.\n\
         Route: {route}.\n\
         Vibe: {vibe}.\n\
         Weather: {weather}.\n\
         Keep it evocative, visual, and under 50 words. Focus on lighting and atmosphere.",
        route = scene.route,
        vibe = scene.vibe,
        weather = scene.weather,
    )
}

/// Timeline beats in order, joined by [`EVENT_CONNECTIVE`].
pub fn join_events(timeline: &Timeline) -> String {
    timeline
        .iter()
        .map(|item| item.description())
        .collect::<Vec<_>>()
        .join(EVENT_CONNECTIVE)
}

/// Full prompt for the video model.
///
/// An empty timeline leaves the events clause empty.
pub fn build_video_prompt(scene: &Scene, timeline: &Timeline) -> String {
    format!(
        "Cinematic video, photorealistic, 4k.\n\
         A night drive. {description}.\n\
         Sequence of events: {events}.\n\
         Style: {vibe} aesthetic, high contrast, cinematic lighting.",
        description = scene.description,
        events = join_events(timeline),
        vibe = scene.vibe,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nds_models::{initial_scene, moment_catalog, Route, Vibe, Weather};

    #[test]
    fn test_description_prompt_uses_scene_fields() {
        let mut scene = initial_scene();
        scene.route = Route::Coastal;
        scene.vibe = Vibe::Noir;
        scene.weather = Weather::Fog;

        let prompt = build_description_prompt(&scene);
        assert!(prompt.contains("Route: coastal."));
        assert!(prompt.contains("Vibe: noir."));
        assert!(prompt.contains("Weather: fog."));
        assert!(!prompt.contains(&scene.description));
        assert_eq!(prompt, build_description_prompt(&scene));
    }

    #[test]
    fn test_video_prompt_joins_events_in_order() {
        let scene = initial_scene();
        let mut timeline = Timeline::new();
        timeline.append(&moment_catalog()[0]);
        timeline.append(&moment_catalog()[2]);
        timeline.append(&moment_catalog()[0]);

        let prompt = build_video_prompt(&scene, &timeline);
        assert!(prompt.contains(
            "Sequence of events: Passing a broken neon sign that flickers ominously., then \
             Entering a brightly lit tunnel, sound changes., then \
             Passing a broken neon sign that flickers ominously.."
        ));
        assert!(prompt.contains("Style: cyberpunk aesthetic"));
    }

    #[test]
    fn test_video_prompt_with_empty_timeline() {
        let scene = initial_scene();
        let prompt = build_video_prompt(&scene, &Timeline::new());

        assert!(!prompt.is_empty());
        assert!(prompt.contains(&scene.description));
        assert!(prompt.contains("cyberpunk"));
        assert!(prompt.contains("Sequence of events: ."));
    }
}
