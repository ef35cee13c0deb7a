use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::{
    ChatModel, HeyGenApi, HeyGenClient, HeyGenConfig, LlmConfig, OpenAiChatClient, SoraApi,
    SoraClient, SoraConfig,
};
use crate::config::Config;
use crate::db::Store;
use crate::services::{EpisodeService, GenerationService, RenderService, StatusService};
use crate::storage::{ObjectStore, S3Store};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across all provider clients to enable connection pooling.
fn build_shared_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .user_agent("Studio/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub episodes: Arc<EpisodeService>,

    pub renders: Arc<RenderService>,

    pub status: Arc<StatusService>,

    pub generation: Arc<GenerationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client()?;

        let sora: Option<Arc<dyn SoraApi>> = if config.sora.enabled {
            Some(Arc::new(SoraClient::with_shared_client(
                http_client.clone(),
                SoraConfig {
                    base_url: config.sora.base_url.clone(),
                    api_key: config.sora.api_key.clone(),
                    model: config.sora.model.clone(),
                },
            )))
        } else {
            None
        };

        let heygen: Option<Arc<dyn HeyGenApi>> = if config.heygen.enabled {
            Some(Arc::new(HeyGenClient::with_shared_client(
                http_client.clone(),
                HeyGenConfig {
                    base_url: config.heygen.base_url.clone(),
                    api_key: config.heygen.api_key.clone(),
                },
            )))
        } else {
            None
        };

        let chat: Option<Arc<dyn ChatModel>> = if config.llm.enabled {
            Some(Arc::new(OpenAiChatClient::with_shared_client(
                http_client,
                LlmConfig {
                    base_url: config.llm.base_url.clone(),
                    api_key: config.llm.api_key.clone(),
                    model: config.llm.model.clone(),
                },
            )))
        } else {
            None
        };

        let blobs: Option<Arc<dyn ObjectStore>> =
            if config.storage.enabled && !config.storage.bucket.is_empty() {
                Some(Arc::new(S3Store::new(&config.storage)?))
            } else {
                None
            };

        Self::with_clients(config, sora, heygen, chat, blobs).await
    }

    /// Wire the service graph around explicit client implementations.
    /// Production uses the HTTP clients; tests inject fakes here.
    pub async fn with_clients(
        config: Config,
        sora: Option<Arc<dyn SoraApi>>,
        heygen: Option<Arc<dyn HeyGenApi>>,
        chat: Option<Arc<dyn ChatModel>>,
        blobs: Option<Arc<dyn ObjectStore>>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let episodes = Arc::new(EpisodeService::new(store.clone()));
        let renders = Arc::new(RenderService::new(
            store.clone(),
            sora.clone(),
            heygen.clone(),
            config.heygen.clone(),
        ));
        let status = Arc::new(StatusService::new(
            store.clone(),
            sora,
            heygen,
            blobs,
        ));
        let generation = Arc::new(GenerationService::new(store.clone(), chat));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            episodes,
            renders,
            status,
            generation,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
