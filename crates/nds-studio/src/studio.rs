//! Studio session state and the controller that drives it.
//!
//! [`StudioState`] is a plain value. Every user action is an [`Intent`], and
//! [`StudioState::apply`] maps `(state, intent)` to the next state without side
//! effects. [`Studio`] owns the live state behind a lock, hands out snapshots,
//! and runs the two outbound flows (scene description and render).

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use nds_genai::{ApiKey, GenerativeBackend, VideoRequest};
use nds_models::{
    find_moment, InstanceId, Moment, MomentId, ProductionPack, Scene, Tab, Timeline, TimelineItem,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use url::Url;
use validator::Validate;

use crate::credentials::{CredentialSelector, CredentialStore};
use crate::error::{RenderError, StudioError, StudioResult};
use crate::metrics;
use crate::notice::Toast;
use crate::prompt::{build_description_prompt, build_video_prompt};

/// Substituted when the text model answers without text.
pub const NO_RESPONSE_FALLBACK: &str = "A dark, mysterious road stretches ahead...";

/// Substituted when the text call fails.
pub const GENERATION_FAILED_FALLBACK: &str = "Failed to generate description. Please check API key.";

pub const RENDER_COMPLETE_MESSAGE: &str = "Render complete!";
pub const KEY_INVALID_MESSAGE: &str = "API Key invalid. Please select again.";
pub const RENDER_FAILED_MESSAGE: &str = "Rendering failed";
pub const PACK_EXPORTED_MESSAGE: &str = "Full Production Pack copied to clipboard";

/// Render lifecycle as seen by the preview panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    #[default]
    Idle,
    Rendering,
    Complete,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RenderState {
    pub status: RenderStatus,
    /// Fetchable URI of the last successful render
    pub video_uri: Option<String>,
    /// Prompt submitted by the current or last render
    pub prompt: Option<String>,
    pub error: Option<String>,
}

impl RenderState {
    pub fn is_rendering(&self) -> bool {
        self.status == RenderStatus::Rendering
    }
}

/// Everything the presentation layer needs to draw the studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudioState {
    pub active_tab: Tab,
    pub scene: Scene,
    pub timeline: Timeline,
    pub render: RenderState,
    pub toast: Option<Toast>,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            scene: Scene::default(),
            timeline: Timeline::new(),
            render: RenderState::default(),
            toast: None,
        }
    }
}

/// A discrete user action or flow milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddMoment(Moment),
    RemoveMoment(InstanceId),
    SetScene(Scene),
    SetTab(Tab),
    DescriptionGenerated(String),
    PackExported,
    RenderStarted { prompt: String },
    RenderSucceeded { video_uri: String },
    RenderFailed { message: String },
}

impl StudioState {
    /// Next state after `intent`. Pure: `self` is left untouched.
    pub fn apply(&self, intent: Intent, now: DateTime<Utc>) -> StudioState {
        let mut next = self.clone();
        match intent {
            Intent::AddMoment(moment) => {
                next.timeline.append(&moment);
                next.toast = Some(Toast::new(
                    format!("Added \"{}\" to timeline", moment.title),
                    now,
                ));
            }
            Intent::RemoveMoment(instance_id) => {
                next.timeline.remove(&instance_id);
            }
            Intent::SetScene(scene) => {
                next.scene = scene;
            }
            Intent::SetTab(tab) => {
                next.active_tab = tab;
            }
            Intent::DescriptionGenerated(description) => {
                next.scene = next.scene.with_description(description);
            }
            Intent::PackExported => {
                next.toast = Some(Toast::new(PACK_EXPORTED_MESSAGE, now));
            }
            Intent::RenderStarted { prompt } => {
                next.active_tab = Tab::Preview;
                next.render = RenderState {
                    status: RenderStatus::Rendering,
                    video_uri: None,
                    prompt: Some(prompt),
                    error: None,
                };
            }
            Intent::RenderSucceeded { video_uri } => {
                next.render.status = RenderStatus::Complete;
                next.render.video_uri = Some(video_uri);
                next.render.error = None;
                next.toast = Some(Toast::new(RENDER_COMPLETE_MESSAGE, now));
            }
            Intent::RenderFailed { message } => {
                next.render.status = RenderStatus::Failed;
                next.render.error = Some(message.clone());
                next.toast = Some(Toast::new(message, now));
            }
        }
        next
    }

    /// Toast still visible at `now`.
    pub fn active_toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_active(now))
    }

    /// Snapshot with expired toasts dropped.
    pub fn visible_at(mut self, now: DateTime<Utc>) -> StudioState {
        if self.active_toast(now).is_none() {
            self.toast = None;
        }
        self
    }
}

/// Inputs captured when a render starts.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub prompt: String,
    pub started_at: Instant,
}

/// The live studio session.
pub struct Studio {
    state: RwLock<StudioState>,
    backend: Arc<dyn GenerativeBackend>,
    credentials: Arc<CredentialStore>,
    selector: Option<Arc<dyn CredentialSelector>>,
}

impl Studio {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        credentials: Arc<CredentialStore>,
        selector: Option<Arc<dyn CredentialSelector>>,
    ) -> Self {
        Self {
            state: RwLock::new(StudioState::default()),
            backend,
            credentials,
            selector,
        }
    }

    /// Current state with expired toasts dropped.
    pub async fn snapshot(&self) -> StudioState {
        self.state.read().await.clone().visible_at(Utc::now())
    }

    /// Apply one intent atomically and return the resulting snapshot.
    pub async fn dispatch(&self, intent: Intent) -> StudioState {
        let now = Utc::now();
        let mut state = self.state.write().await;
        *state = state.apply(intent, now);
        metrics::set_timeline_items(state.timeline.len());
        state.clone().visible_at(now)
    }

    /// Place a catalog moment on the timeline.
    pub async fn add_moment(&self, moment_id: &MomentId) -> StudioResult<TimelineItem> {
        let moment = find_moment(moment_id)
            .ok_or_else(|| StudioError::not_found(format!("Moment {} not found", moment_id)))?;

        let state = self.dispatch(Intent::AddMoment(moment.clone())).await;
        info!(moment_id = %moment_id, total = state.timeline.total_duration(), "Moment added");

        state
            .timeline
            .items()
            .last()
            .cloned()
            .ok_or_else(|| StudioError::internal("Timeline empty after append"))
    }

    /// Remove a placement. Unknown IDs leave the timeline unchanged.
    pub async fn remove_moment(&self, instance_id: &InstanceId) -> StudioState {
        self.dispatch(Intent::RemoveMoment(instance_id.clone())).await
    }

    /// Replace the live scene.
    pub async fn set_scene(&self, scene: Scene) -> StudioResult<Scene> {
        scene.validate()?;
        Ok(self.dispatch(Intent::SetScene(scene)).await.scene)
    }

    pub async fn set_tab(&self, tab: Tab) -> StudioState {
        self.dispatch(Intent::SetTab(tab)).await
    }

    /// Ask the text model for a new scene description.
    ///
    /// Never fails: errors and empty answers become fallback text. The text is
    /// applied to the scene that is live when the call returns.
    pub async fn describe_scene(&self) -> Scene {
        let scene = self.state.read().await.scene.clone();
        let prompt = build_description_prompt(&scene);
        let api_key = self.credentials.current().await;

        let description = match self.backend.generate_text(api_key.as_ref(), &prompt).await {
            Ok(Some(text)) => {
                metrics::record_description("generated");
                text
            }
            Ok(None) => {
                metrics::record_description("empty");
                NO_RESPONSE_FALLBACK.to_string()
            }
            Err(e) => {
                error!("GenAI text error: {}", e);
                metrics::record_description("failed");
                GENERATION_FAILED_FALLBACK.to_string()
            }
        };

        self.dispatch(Intent::DescriptionGenerated(description))
            .await
            .scene
    }

    /// Mark a render as started and capture its prompt.
    ///
    /// Only one render may be outstanding at a time.
    pub async fn begin_render(&self) -> StudioResult<RenderJob> {
        let now = Utc::now();
        let mut state = self.state.write().await;

        if state.render.is_rendering() {
            return Err(StudioError::conflict("A render is already in progress"));
        }

        let prompt = build_video_prompt(&state.scene, &state.timeline);
        *state = state.apply(
            Intent::RenderStarted {
                prompt: prompt.clone(),
            },
            now,
        );

        info!(
            clips = state.timeline.len(),
            total_duration = state.timeline.total_duration(),
            "Render started"
        );

        Ok(RenderJob {
            prompt,
            started_at: Instant::now(),
        })
    }

    /// Run a started render to completion and record the outcome.
    ///
    /// Failures become toasts; the rendering flag always clears.
    pub async fn run_render(&self, job: RenderJob) -> StudioState {
        let result = self.invoke_render(&job).await;
        let elapsed = job.started_at.elapsed().as_secs_f64();

        match result {
            Ok(video_uri) => {
                info!(duration_secs = elapsed, "Render complete");
                metrics::record_render("complete", elapsed);
                self.dispatch(Intent::RenderSucceeded { video_uri }).await
            }
            Err(e) => {
                error!(kind = e.kind(), "Render failed: {}", e);
                metrics::record_render(e.kind(), elapsed);

                if e.is_credential_rejected() {
                    // Prompt before the failure becomes observable to pollers
                    if let Some(selector) = &self.selector {
                        selector.open_select_key().await;
                    }
                    self.dispatch(Intent::RenderFailed {
                        message: KEY_INVALID_MESSAGE.to_string(),
                    })
                    .await
                } else {
                    let message = e.to_string();
                    let message = if message.trim().is_empty() {
                        RENDER_FAILED_MESSAGE.to_string()
                    } else {
                        message
                    };
                    self.dispatch(Intent::RenderFailed { message }).await
                }
            }
        }
    }

    /// Start a render and wait for it.
    pub async fn render(&self) -> StudioResult<StudioState> {
        let job = self.begin_render().await?;
        Ok(self.run_render(job).await)
    }

    async fn invoke_render(&self, job: &RenderJob) -> Result<String, RenderError> {
        if let Some(selector) = &self.selector {
            if !selector.has_selected_key().await {
                selector.open_select_key().await;
                return Err(RenderError::CredentialNotSelected);
            }
        }

        let api_key = self.credentials.current().await;
        let request = VideoRequest::new(job.prompt.clone());
        let video = self
            .backend
            .generate_video(api_key.as_ref(), &request)
            .await?;

        match api_key {
            Some(key) => authorize_uri(&video.uri, &key),
            None => {
                warn!("Render returned without a credential to attach");
                Ok(video.uri)
            }
        }
    }

    /// Scene and timeline bundled for export.
    pub async fn export_pack(&self) -> ProductionPack {
        let state = self.dispatch(Intent::PackExported).await;
        ProductionPack::new(state.scene, state.timeline)
    }
}

/// Attach the credential so the front-end can fetch the video directly.
fn authorize_uri(uri: &str, key: &ApiKey) -> Result<String, RenderError> {
    let mut url = Url::parse(uri).map_err(|e| RenderError::InvalidUri(format!("{}: {}", uri, e)))?;
    url.query_pairs_mut().append_pair("key", key.expose());
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Duration;
    use nds_genai::{GenAiError, GenAiResult, GeneratedVideo};
    use tokio::sync::Notify;

    use super::*;

    #[derive(Clone, Copy)]
    enum Outcome {
        Ok,
        Empty,
        RejectKey,
        Fail,
    }

    struct FakeBackend {
        outcome: Outcome,
        gate: Option<Arc<Notify>>,
        video_calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                gate: None,
                video_calls: AtomicUsize::new(0),
            }
        }

        fn gated(outcome: Outcome, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(outcome)
            }
        }

        fn error(&self) -> GenAiError {
            match self.outcome {
                Outcome::RejectKey => {
                    GenAiError::CredentialRejected("Requested entity was not found.".to_string())
                }
                _ => GenAiError::Service {
                    status: 500,
                    message: "backend exploded".to_string(),
                },
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for FakeBackend {
        async fn generate_text(
            &self,
            api_key: Option<&ApiKey>,
            _prompt: &str,
        ) -> GenAiResult<Option<String>> {
            api_key.ok_or(GenAiError::MissingApiKey)?;
            match self.outcome {
                Outcome::Ok => Ok(Some("Headlights carve the fog.".to_string())),
                Outcome::Empty => Ok(None),
                _ => Err(self.error()),
            }
        }

        async fn generate_video(
            &self,
            api_key: Option<&ApiKey>,
            request: &VideoRequest,
        ) -> GenAiResult<GeneratedVideo> {
            self.video_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            api_key.ok_or(GenAiError::MissingApiKey)?;
            match self.outcome {
                Outcome::Ok => Ok(GeneratedVideo {
                    uri: "https://files.example/v/1:download?alt=media".to_string(),
                    prompt: request.prompt.clone(),
                }),
                Outcome::Empty => Err(GenAiError::EmptyResult),
                _ => Err(self.error()),
            }
        }
    }

    fn studio_with(backend: FakeBackend, key: Option<&str>, with_selector: bool) -> (Studio, Arc<CredentialStore>) {
        let credentials = Arc::new(CredentialStore::new(key.map(ApiKey::new)));
        let selector: Option<Arc<dyn CredentialSelector>> = if with_selector {
            Some(credentials.clone() as Arc<dyn CredentialSelector>)
        } else {
            None
        };
        let studio = Studio::new(Arc::new(backend), credentials.clone(), selector);
        (studio, credentials)
    }

    fn moment_id(id: &str) -> MomentId {
        MomentId::from_string(id)
    }

    #[test]
    fn test_apply_is_pure() {
        let state = StudioState::default();
        let moment = find_moment(&moment_id("m1")).unwrap().clone();
        let next = state.apply(Intent::AddMoment(moment), Utc::now());

        assert!(state.timeline.is_empty());
        assert!(state.toast.is_none());
        assert_eq!(next.timeline.len(), 1);
        assert_eq!(
            next.toast.as_ref().map(|t| t.message.as_str()),
            Some("Added \"Neon Flicker\" to timeline")
        );
    }

    #[test]
    fn test_toast_hidden_after_ttl() {
        let now = Utc::now();
        let state = StudioState::default().apply(Intent::PackExported, now);

        assert!(state.active_toast(now).is_some());
        assert!(state.active_toast(now + Duration::seconds(3)).is_none());
        assert!(state.visible_at(now + Duration::seconds(4)).toast.is_none());
    }

    #[test]
    fn test_render_started_switches_to_preview_and_clears_video() {
        let now = Utc::now();
        let done = StudioState::default().apply(
            Intent::RenderSucceeded {
                video_uri: "https://x".to_string(),
            },
            now,
        );
        let started = done.apply(
            Intent::RenderStarted {
                prompt: "p".to_string(),
            },
            now,
        );

        assert_eq!(started.active_tab, Tab::Preview);
        assert!(started.render.is_rendering());
        assert!(started.render.video_uri.is_none());
        assert_eq!(started.render.prompt.as_deref(), Some("p"));
    }

    #[tokio::test]
    async fn test_append_then_remove_keeps_stale_start_time() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), Some("k"), true);

        let a = studio.add_moment(&moment_id("m1")).await.unwrap();
        let b = studio.add_moment(&moment_id("m2")).await.unwrap();
        assert_eq!(a.start_time, 0);
        assert_eq!(b.start_time, 3);
        assert_eq!(studio.snapshot().await.timeline.total_duration(), 8);

        let state = studio.remove_moment(&a.instance_id).await;
        assert_eq!(state.timeline.len(), 1);
        assert_eq!(state.timeline.items()[0].instance_id, b.instance_id);
        assert_eq!(state.timeline.items()[0].start_time, 3);
    }

    #[tokio::test]
    async fn test_add_unknown_moment_is_not_found() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), Some("k"), true);
        let err = studio.add_moment(&moment_id("m42")).await.unwrap_err();
        assert!(matches!(err, StudioError::NotFound(_)));
        assert!(studio.snapshot().await.timeline.is_empty());
    }

    #[tokio::test]
    async fn test_set_scene_validates() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), Some("k"), true);
        let mut scene = Scene::default();
        scene.name = String::new();
        assert!(matches!(
            studio.set_scene(scene).await,
            Err(StudioError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_describe_scene_uses_generated_text() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), Some("k"), true);
        let scene = studio.describe_scene().await;
        assert_eq!(scene.description, "Headlights carve the fog.");
    }

    #[tokio::test]
    async fn test_describe_scene_fallbacks() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Empty), Some("k"), true);
        assert_eq!(studio.describe_scene().await.description, NO_RESPONSE_FALLBACK);

        let (studio, _) = studio_with(FakeBackend::new(Outcome::Fail), Some("k"), true);
        assert_eq!(
            studio.describe_scene().await.description,
            GENERATION_FAILED_FALLBACK
        );

        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), None, false);
        assert_eq!(
            studio.describe_scene().await.description,
            GENERATION_FAILED_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_render_success_attaches_key() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), Some("secret"), true);
        studio.add_moment(&moment_id("m3")).await.unwrap();

        let state = studio.render().await.unwrap();
        assert_eq!(state.render.status, RenderStatus::Complete);
        assert_eq!(
            state.render.video_uri.as_deref(),
            Some("https://files.example/v/1:download?alt=media&key=secret")
        );
        assert!(state.render.prompt.unwrap().contains("Entering a brightly lit tunnel"));
        assert_eq!(state.toast.unwrap().message, RENDER_COMPLETE_MESSAGE);
        assert_eq!(state.active_tab, Tab::Preview);
    }

    #[tokio::test]
    async fn test_render_rejected_key_prompts_reselect() {
        let (studio, credentials) =
            studio_with(FakeBackend::new(Outcome::RejectKey), Some("stale"), true);

        let state = studio.render().await.unwrap();
        assert_eq!(state.render.status, RenderStatus::Failed);
        assert!(!state.render.is_rendering());
        assert_eq!(state.toast.unwrap().message, KEY_INVALID_MESSAGE);
        assert!(credentials.prompt_requested());
    }

    /// Records the render status seen at the moment selection is requested.
    struct StatusRecordingSelector {
        studio: std::sync::OnceLock<std::sync::Weak<Studio>>,
        seen: std::sync::Mutex<Vec<RenderStatus>>,
    }

    #[async_trait]
    impl CredentialSelector for StatusRecordingSelector {
        async fn has_selected_key(&self) -> bool {
            true
        }

        async fn open_select_key(&self) {
            let studio = self.studio.get().and_then(|w| w.upgrade());
            if let Some(studio) = studio {
                let status = studio.snapshot().await.render.status;
                self.seen.lock().unwrap().push(status);
            }
        }
    }

    #[tokio::test]
    async fn test_rejected_key_prompt_precedes_failed_status() {
        let selector = Arc::new(StatusRecordingSelector {
            studio: std::sync::OnceLock::new(),
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let credentials = Arc::new(CredentialStore::new(Some(ApiKey::new("stale"))));
        let studio = Arc::new(Studio::new(
            Arc::new(FakeBackend::new(Outcome::RejectKey)),
            credentials,
            Some(selector.clone() as Arc<dyn CredentialSelector>),
        ));
        selector.studio.set(Arc::downgrade(&studio)).unwrap();

        let state = studio.render().await.unwrap();

        assert_eq!(state.render.status, RenderStatus::Failed);
        assert_eq!(*selector.seen.lock().unwrap(), vec![RenderStatus::Rendering]);
    }

    #[tokio::test]
    async fn test_render_without_selected_key_fails_proactively() {
        let backend = FakeBackend::new(Outcome::Ok);
        let (studio, credentials) = studio_with(backend, None, true);

        let state = studio.render().await.unwrap();
        assert_eq!(state.render.status, RenderStatus::Failed);
        assert_eq!(
            state.toast.unwrap().message,
            "Please select a paid API key to use Veo."
        );
        assert!(credentials.prompt_requested());
    }

    #[tokio::test]
    async fn test_render_without_selector_defers_to_outbound_call() {
        let backend = Arc::new(FakeBackend::new(Outcome::Ok));
        let credentials = Arc::new(CredentialStore::new(None));
        let studio = Studio::new(backend.clone(), credentials.clone(), None);

        let state = studio.render().await.unwrap();
        assert_eq!(backend.video_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.render.status, RenderStatus::Failed);
        assert_eq!(state.toast.unwrap().message, "API Key not found");
        assert!(!credentials.prompt_requested());
    }

    #[tokio::test]
    async fn test_render_empty_result() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Empty), Some("k"), true);
        let state = studio.render().await.unwrap();
        assert_eq!(state.render.error.as_deref(), Some("No video URI returned."));
    }

    #[tokio::test]
    async fn test_second_render_rejected_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let (studio, _) = studio_with(
            FakeBackend::gated(Outcome::Ok, gate.clone()),
            Some("k"),
            true,
        );
        let studio = Arc::new(studio);

        let job = studio.begin_render().await.unwrap();
        let running = {
            let studio = studio.clone();
            tokio::spawn(async move { studio.run_render(job).await })
        };

        assert!(matches!(
            studio.begin_render().await,
            Err(StudioError::Conflict(_))
        ));

        // Timeline edits stay possible while the render is outstanding
        studio.add_moment(&moment_id("m5")).await.unwrap();
        assert!(studio.snapshot().await.render.is_rendering());

        gate.notify_one();
        let state = running.await.unwrap();
        assert_eq!(state.render.status, RenderStatus::Complete);
        assert_eq!(state.timeline.len(), 1);
        assert!(studio.begin_render().await.is_ok());
    }

    #[tokio::test]
    async fn test_export_pack() {
        let (studio, _) = studio_with(FakeBackend::new(Outcome::Ok), Some("k"), true);
        studio.add_moment(&moment_id("m4")).await.unwrap();

        let pack = studio.export_pack().await;
        assert_eq!(pack.timeline.len(), 1);
        assert_eq!(
            studio.snapshot().await.toast.unwrap().message,
            PACK_EXPORTED_MESSAGE
        );
    }
}
