use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use studio::clients::{
    ChatModel, HeyGenApi, HeyGenRenderSpec, HeyGenStatus, ProviderHttpError, SoraApi,
    SoraCreateVideo, SoraJobError, SoraVideo,
};
use studio::config::Config;
use studio::models::{
    AssetPromptOutcome, CutOutcome, EpisodeStatus, Provider, RenderPhase, SoraDuration,
};
use studio::services::{HeyGenRenderRequest, SoraRenderRequest, StudioError};
use studio::state::SharedState;
use studio::storage::ObjectStore;

// ---------- mocks ----------

struct MockSora {
    status: Mutex<String>,
    error: Mutex<Option<SoraJobError>>,
    http_error: Mutex<Option<(u16, String)>>,
    last_request: Mutex<Option<SoraCreateVideo>>,
    downloads: AtomicUsize,
    polls: AtomicUsize,
}

impl MockSora {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new("in_progress".to_string()),
            error: Mutex::new(None),
            http_error: Mutex::new(None),
            last_request: Mutex::new(None),
            downloads: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
        })
    }

    fn set_status(&self, status: &str) {
        *self.status.lock().unwrap() = status.to_string();
    }

    fn set_error(&self, code: &str, message: &str) {
        self.set_status("failed");
        *self.error.lock().unwrap() = Some(SoraJobError {
            code: Some(code.to_string()),
            message: Some(message.to_string()),
        });
    }

    fn set_http_error(&self, code: u16, body: &str) {
        *self.http_error.lock().unwrap() = Some((code, body.to_string()));
    }

    fn last_request(&self) -> SoraCreateVideo {
        self.last_request.lock().unwrap().clone().unwrap()
    }
}

#[async_trait]
impl SoraApi for MockSora {
    async fn create_video(&self, req: &SoraCreateVideo) -> Result<String> {
        *self.last_request.lock().unwrap() = Some(req.clone());
        Ok("sora-job-1".to_string())
    }

    async fn get_video(&self, video_id: &str) -> Result<SoraVideo> {
        if let Some((code, body)) = self.http_error.lock().unwrap().clone() {
            return Err(ProviderHttpError::new("Sora", code, body).into());
        }
        self.polls.fetch_add(1, Ordering::SeqCst);
        Ok(SoraVideo {
            id: video_id.to_string(),
            status: self.status.lock().unwrap().clone(),
            progress: None,
            error: self.error.lock().unwrap().clone(),
        })
    }

    async fn download_content(&self, _video_id: &str) -> Result<Vec<u8>> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0u8; 16])
    }
}

struct MockHeyGen {
    status: Mutex<String>,
    http_error: Mutex<Option<(u16, String)>>,
    last_spec: Mutex<Option<HeyGenRenderSpec>>,
}

impl MockHeyGen {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new("processing".to_string()),
            http_error: Mutex::new(None),
            last_spec: Mutex::new(None),
        })
    }

    fn set_http_error(&self, code: u16, body: &str) {
        *self.http_error.lock().unwrap() = Some((code, body.to_string()));
    }
}

#[async_trait]
impl HeyGenApi for MockHeyGen {
    async fn generate(&self, spec: &HeyGenRenderSpec) -> Result<String> {
        *self.last_spec.lock().unwrap() = Some(spec.clone());
        Ok("heygen-job-1".to_string())
    }

    async fn status(&self, _video_id: &str) -> Result<HeyGenStatus> {
        if let Some((code, body)) = self.http_error.lock().unwrap().clone() {
            return Err(ProviderHttpError::new("HeyGen", code, body).into());
        }
        let status = self.status.lock().unwrap().clone();
        Ok(HeyGenStatus {
            video_url: (status == "completed")
                .then(|| "https://provider.test/signed.mp4".to_string()),
            status,
            error: None,
        })
    }

    async fn fetch_video(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(vec![1u8; 16])
    }
}

/// Answers each generation stage based on the prompt it receives.
struct MockChat {
    thumbnail_reply: String,
}

impl MockChat {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            thumbnail_reply: r#"{"concept":"Shadowed desk","image_prompt":"A noir desk lamp","text_overlay":"THE QUOTA TRAP"}"#
                .to_string(),
        })
    }

    fn with_broken_thumbnail() -> Arc<Self> {
        Arc::new(Self {
            thumbnail_reply: "sorry, here is your thumbnail:".to_string(),
        })
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("B-roll video prompts") {
            return Ok(
                "```json\n[{\"scene\":\"Rain on glass\",\"prompt\":\"Rain streaks a dark office window\",\"duration\":4,\"timing\":\"Hook\"}]\n```"
                    .to_string(),
            );
        }
        if prompt.contains("thumbnail concept") {
            return Ok(self.thumbnail_reply.clone());
        }
        if prompt.contains("Adapt this video script") {
            return Ok("ADAPTED: the short version.".to_string());
        }
        Ok("HOOK: The quota board never lies.\n\nBODY: ...".to_string())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

struct FailingChat;

#[async_trait]
impl ChatModel for FailingChat {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("model overloaded"))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

struct MemoryBlobs {
    keys: Mutex<Vec<String>>,
}

impl MemoryBlobs {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            keys: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ObjectStore for MemoryBlobs {
    async fn put_bytes(&self, key: &str, _data: Vec<u8>, _content_type: &str) -> Result<String> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://cdn.test/{}", key))
    }
}

// ---------- wiring ----------

struct Harness {
    state: SharedState,
    sora: Arc<MockSora>,
    heygen: Arc<MockHeyGen>,
    blobs: Arc<MemoryBlobs>,
}

async fn spawn_harness(chat: Arc<dyn ChatModel>) -> Harness {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let sora = MockSora::new();
    let heygen = MockHeyGen::new();
    let blobs = MemoryBlobs::new();

    let state = SharedState::with_clients(
        config,
        Some(sora.clone()),
        Some(heygen.clone()),
        Some(chat),
        Some(blobs.clone()),
    )
    .await
    .expect("Failed to build state");

    Harness {
        state,
        sora,
        heygen,
        blobs,
    }
}

async fn seed_episode(state: &SharedState) -> String {
    let episode = state
        .episodes
        .create(
            "Quota Files",
            1,
            "The Quota Trap",
            Some("Why quotas fail"),
            None,
        )
        .await
        .unwrap();
    episode.id
}

async fn seed_scripted_episode(state: &SharedState) -> String {
    let id = seed_episode(state).await;
    state.generation.generate_script(&id).await.unwrap();
    id
}

// ---------- generation ----------

#[tokio::test]
async fn script_generation_moves_episode_to_review() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_episode(&h.state).await;

    let script = h.state.generation.generate_script(&id).await.unwrap();
    assert_eq!(script.version, 1);
    assert!(script.canonical);
    assert_eq!(script.model.as_deref(), Some("mock-model"));

    let episode = h.state.episodes.get(&id).await.unwrap();
    assert_eq!(episode.status, "PENDING_REVIEW");
}

#[tokio::test]
async fn regeneration_keeps_one_canonical_script() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_episode(&h.state).await;

    h.state.generation.generate_script(&id).await.unwrap();
    let second = h.state.generation.generate_script(&id).await.unwrap();
    assert_eq!(second.version, 2);

    let scripts = h.state.store.list_scripts(&id).await.unwrap();
    assert_eq!(scripts.len(), 2);
    let canonical: Vec<_> = scripts.iter().filter(|s| s.canonical).collect();
    assert_eq!(canonical.len(), 1);
    assert_eq!(canonical[0].version, 2);
}

#[tokio::test]
async fn failed_generation_returns_episode_to_draft() {
    let h = spawn_harness(Arc::new(FailingChat)).await;
    let id = seed_episode(&h.state).await;

    let err = h.state.generation.generate_script(&id).await.unwrap_err();
    assert!(matches!(err, StudioError::Provider { .. }));

    let episode = h.state.episodes.get(&id).await.unwrap();
    assert_eq!(episode.status, "DRAFT");
    assert!(h.state.store.list_scripts(&id).await.unwrap().is_empty());
}

#[tokio::test]
async fn cut_generation_covers_all_formats_and_is_idempotent() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let outcomes = h.state.generation.generate_cuts(&id, None).await.unwrap();
    assert_eq!(outcomes.len(), 5);
    assert!(outcomes.iter().all(CutOutcome::is_created));

    let cuts = h.state.store.list_cuts(&id).await.unwrap();
    assert_eq!(cuts.len(), 5);
    assert!(cuts.iter().all(|c| c.status == "DRAFT"));
    let yt_short = cuts.iter().find(|c| c.format == "YT_SHORT").unwrap();
    assert_eq!(yt_short.duration_target, 35);

    // Second run skips everything without touching the DB.
    let rerun = h.state.generation.generate_cuts(&id, None).await.unwrap();
    assert!(rerun.iter().all(|o| matches!(o, CutOutcome::Skipped { .. })));
    assert_eq!(h.state.store.list_cuts(&id).await.unwrap().len(), 5);
}

#[tokio::test]
async fn unknown_cut_format_is_reported_not_fatal() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let outcomes = h
        .state
        .generation
        .generate_cuts(&id, Some(vec!["VINE".to_string(), "TIKTOK".to_string()]))
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        &outcomes[0],
        CutOutcome::Skipped { format, .. } if format == "VINE"
    ));
    assert!(outcomes[1].is_created());
}

#[tokio::test]
async fn asset_prompts_store_pending_placeholders() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let outcomes = h
        .state
        .generation
        .generate_asset_prompts(&id)
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(
        outcomes
            .iter()
            .all(|o| matches!(o, AssetPromptOutcome::Created { .. }))
    );

    let assets = h.state.store.list_assets(&id).await.unwrap();
    assert_eq!(assets.len(), 2);
    assert!(assets.iter().all(|a| a.status == "PENDING"));
    assert!(assets.iter().all(|a| a.provider_job_id.is_none()));
}

#[tokio::test]
async fn malformed_thumbnail_does_not_lose_broll() {
    let h = spawn_harness(MockChat::with_broken_thumbnail()).await;
    let id = seed_scripted_episode(&h.state).await;

    let outcomes = h
        .state
        .generation
        .generate_asset_prompts(&id)
        .await
        .unwrap();

    assert!(matches!(
        &outcomes[0],
        AssetPromptOutcome::Created { asset_ids, .. } if !asset_ids.is_empty()
    ));
    assert!(matches!(&outcomes[1], AssetPromptOutcome::ParseFailed { .. }));
}

// ---------- rendering ----------

fn sora_request(episode_id: &str) -> SoraRenderRequest {
    SoraRenderRequest {
        episode_id: episode_id.to_string(),
        cut_id: None,
        prompt: None,
        duration: SoraDuration::Eight,
        aspect: Default::default(),
        model: None,
        input_reference: None,
    }
}

#[tokio::test]
async fn render_records_processing_asset_with_job_id() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let receipt = h.state.renders.render_sora(sora_request(&id)).await.unwrap();
    assert_eq!(receipt.provider, Provider::Sora);
    assert_eq!(receipt.video_id, "sora-job-1");
    assert_eq!(receipt.status, RenderPhase::Processing);

    let asset = h
        .state
        .store
        .find_asset_by_job_id("sora-job-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.status, "PROCESSING");
    assert_eq!(asset.provider.as_deref(), Some("sora"));
}

#[tokio::test]
async fn default_prompt_embeds_canonical_script() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    let req = h.sora.last_request();
    assert!(req.prompt.contains("The quota board never lies"));
    assert_eq!(req.seconds, "8");
    assert_eq!(req.size, "720x1280");
}

#[tokio::test]
async fn cut_script_wins_over_canonical_in_prompt() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let outcomes = h
        .state
        .generation
        .generate_cuts(&id, Some(vec!["TIKTOK".to_string()]))
        .await
        .unwrap();
    let CutOutcome::Created { cut_id, .. } = &outcomes[0] else {
        panic!("expected created cut");
    };

    let mut req = sora_request(&id);
    req.cut_id = Some(cut_id.clone());
    h.state.renders.render_sora(req).await.unwrap();

    let submitted = h.sora.last_request();
    assert!(submitted.prompt.contains("ADAPTED: the short version."));
    assert!(!submitted.prompt.contains("The quota board never lies"));
}

#[tokio::test]
async fn model_and_reference_overrides_reach_the_provider() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let mut req = sora_request(&id);
    req.model = Some("sora-2-pro".to_string());
    req.input_reference = Some("https://cdn.test/ref.png".to_string());
    h.state.renders.render_sora(req).await.unwrap();

    let submitted = h.sora.last_request();
    assert_eq!(submitted.model.as_deref(), Some("sora-2-pro"));
    assert_eq!(
        submitted.input_reference.as_deref(),
        Some("https://cdn.test/ref.png")
    );
}

#[tokio::test]
async fn render_without_script_or_prompt_is_rejected() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_episode(&h.state).await;

    let err = h.state.renders.render_sora(sora_request(&id)).await.unwrap_err();
    assert!(matches!(err, StudioError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_render_for_same_target_conflicts() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    h.state.renders.render_sora(sora_request(&id)).await.unwrap();
    let err = h.state.renders.render_sora(sora_request(&id)).await.unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));
}

#[tokio::test]
async fn heygen_render_uses_default_avatar_record() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    h.state
        .store
        .create_avatar("Marlowe", "avatar-123", Some("voice-9"), true)
        .await
        .unwrap();

    let receipt = h
        .state
        .renders
        .render_heygen(HeyGenRenderRequest {
            episode_id: id,
            cut_id: None,
            script_text: None,
            avatar: None,
            aspect: Default::default(),
        })
        .await
        .unwrap();
    assert_eq!(receipt.provider, Provider::Heygen);

    let spec = h.heygen.last_spec.lock().unwrap().clone().unwrap();
    assert_eq!(spec.avatar_id, "avatar-123");
    assert_eq!(spec.voice_id, "voice-9");
    // 9:16 default aspect.
    assert_eq!((spec.width, spec.height), (1080, 1920));
}

#[tokio::test]
async fn heygen_render_without_default_avatar_is_configuration_error() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let err = h
        .state
        .renders
        .render_heygen(HeyGenRenderRequest {
            episode_id: id,
            cut_id: None,
            script_text: None,
            avatar: None,
            aspect: Default::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Configuration(_)));
}

// ---------- status polling ----------

#[tokio::test]
async fn completed_render_is_uploaded_then_marked() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    let report = h.state.status.check("sora-job-1").await.unwrap();
    assert_eq!(report.status, RenderPhase::Processing);

    h.sora.set_status("completed");
    let report = h.state.status.check("sora-job-1").await.unwrap();
    assert_eq!(report.status, RenderPhase::Completed);

    let asset = h
        .state
        .store
        .find_asset_by_job_id("sora-job-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.status, "COMPLETED");
    let url = asset.url.unwrap();
    assert_eq!(url, format!("https://cdn.test/videos/{}/{}.mp4", id, asset.id));
    assert_eq!(h.blobs.keys.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn terminal_assets_are_not_repolled() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    h.sora.set_status("completed");
    h.state.status.check("sora-job-1").await.unwrap();
    let polls_after_completion = h.sora.polls.load(Ordering::SeqCst);

    // Provider now claims failure, but the stored outcome wins.
    h.sora.set_error("E_LATE", "too late");
    let report = h.state.status.check("sora-job-1").await.unwrap();
    assert_eq!(report.status, RenderPhase::Completed);
    assert_eq!(h.sora.polls.load(Ordering::SeqCst), polls_after_completion);
    assert_eq!(h.sora.downloads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_render_records_error_code() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    h.sora.set_error("E_MODERATION", "prompt rejected");
    let report = h.state.status.check("sora-job-1").await.unwrap();
    assert_eq!(report.status, RenderPhase::Failed);
    assert_eq!(report.error_code.as_deref(), Some("E_MODERATION"));

    let asset = h
        .state
        .store
        .find_asset_by_job_id("sora-job-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.status, "FAILED");
    assert_eq!(asset.error_code.as_deref(), Some("E_MODERATION"));
    assert_eq!(asset.error.as_deref(), Some("prompt rejected"));
}

#[tokio::test]
async fn non_2xx_status_poll_fails_the_asset() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    h.sora.set_http_error(500, "boom");
    let report = h.state.status.check("sora-job-1").await.unwrap();
    assert_eq!(report.status, RenderPhase::Failed);
    assert_eq!(report.error.as_deref(), Some("boom"));
    assert_eq!(report.error_code.as_deref(), Some("500"));

    let asset = h
        .state
        .store
        .find_asset_by_job_id("sora-job-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.status, "FAILED");
    assert_eq!(asset.error.as_deref(), Some("boom"));
    assert_eq!(asset.error_code.as_deref(), Some("500"));
}

#[tokio::test]
async fn non_2xx_heygen_poll_fails_the_asset() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state
        .store
        .create_avatar("Marlowe", "avatar-123", Some("voice-9"), true)
        .await
        .unwrap();
    h.state
        .renders
        .render_heygen(HeyGenRenderRequest {
            episode_id: id,
            cut_id: None,
            script_text: None,
            avatar: None,
            aspect: Default::default(),
        })
        .await
        .unwrap();

    h.heygen.set_http_error(404, "video not found");
    let report = h.state.status.check("heygen-job-1").await.unwrap();
    assert_eq!(report.status, RenderPhase::Failed);
    assert_eq!(report.error.as_deref(), Some("video not found"));
    assert_eq!(report.error_code.as_deref(), Some("404"));

    let asset = h
        .state
        .store
        .find_asset_by_job_id("heygen-job-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.status, "FAILED");
}

#[tokio::test]
async fn failure_frees_the_target_for_resubmission() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    h.sora.set_error("E_MODERATION", "prompt rejected");
    h.state.status.check("sora-job-1").await.unwrap();

    // The PROCESSING slot is released, so a new submission goes through.
    h.sora.set_status("in_progress");
    *h.sora.error.lock().unwrap() = None;
    assert!(h.state.renders.render_sora(sora_request(&id)).await.is_ok());
}

#[tokio::test]
async fn poll_sweep_advances_terminal_jobs() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    let advanced = h.state.status.poll_processing().await.unwrap();
    assert_eq!(advanced, 0);

    h.sora.set_status("completed");
    let advanced = h.state.status.poll_processing().await.unwrap();
    assert_eq!(advanced, 1);

    // Nothing left in flight.
    let advanced = h.state.status.poll_processing().await.unwrap();
    assert_eq!(advanced, 0);
}

#[tokio::test]
async fn stale_sweep_fails_renders_past_the_ttl() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    // TTL of zero: anything PROCESSING is already stale.
    let reaped = h.state.status.sweep_stale(0).await.unwrap();
    assert_eq!(reaped, 1);

    let asset = h
        .state
        .store
        .find_asset_by_job_id("sora-job-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asset.status, "FAILED");
    assert_eq!(asset.error_code.as_deref(), Some("STALE_TIMEOUT"));
}

#[tokio::test]
async fn cut_render_lifecycle_updates_the_cut() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let outcomes = h
        .state
        .generation
        .generate_cuts(&id, Some(vec!["TIKTOK".to_string()]))
        .await
        .unwrap();
    let CutOutcome::Created { cut_id, .. } = &outcomes[0] else {
        panic!("expected created cut");
    };

    let mut req = sora_request(&id);
    req.cut_id = Some(cut_id.clone());
    h.state.renders.render_sora(req).await.unwrap();

    let cut = h.state.store.get_cut(cut_id).await.unwrap().unwrap();
    assert_eq!(cut.status, "RENDERING");

    h.sora.set_status("completed");
    h.state.status.check("sora-job-1").await.unwrap();

    let cut = h.state.store.get_cut(cut_id).await.unwrap().unwrap();
    assert_eq!(cut.status, "RENDERED");
    assert!(cut.video_url.unwrap().starts_with("https://cdn.test/videos/"));
}

// ---------- lifecycle & publish gating ----------

#[tokio::test]
async fn operator_status_update_is_persisted() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;

    let episode = h
        .state
        .episodes
        .update_status(&id, EpisodeStatus::Draft)
        .await
        .unwrap();
    assert_eq!(episode.status, "DRAFT");

    let err = h
        .state
        .episodes
        .update_status("no-such-episode", EpisodeStatus::Draft)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::NotFound(_)));
}

#[tokio::test]
async fn publish_date_target_is_stored_on_create() {
    let h = spawn_harness(MockChat::new()).await;

    let episode = h
        .state
        .episodes
        .create(
            "Quota Files",
            2,
            "The Pipeline Myth",
            None,
            Some("2026-09-15T00:00:00Z"),
        )
        .await
        .unwrap();
    assert_eq!(
        episode.publish_date_target.as_deref(),
        Some("2026-09-15T00:00:00Z")
    );
    assert!(episode.external_video_id.is_none());
}

#[tokio::test]
async fn publish_blocked_while_renders_are_in_flight() {
    let h = spawn_harness(MockChat::new()).await;
    let id = seed_scripted_episode(&h.state).await;
    h.state.renders.render_sora(sora_request(&id)).await.unwrap();

    let err = h.state.episodes.publish(&id, None).await.unwrap_err();
    assert!(matches!(err, StudioError::Conflict(_)));

    h.sora.set_status("completed");
    h.state.status.check("sora-job-1").await.unwrap();

    let episode = h.state.episodes.publish(&id, Some("yt-abc123")).await.unwrap();
    assert_eq!(episode.status, "PUBLISHED");
    assert!(episode.published_at.is_some());
    assert_eq!(episode.external_video_id.as_deref(), Some("yt-abc123"));

    // Publishing again is a no-op.
    let again = h.state.episodes.publish(&id, None).await.unwrap();
    assert_eq!(again.status, "PUBLISHED");
}
