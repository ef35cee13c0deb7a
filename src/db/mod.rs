use crate::entities::{asset, avatar, cut, episode, script};
use crate::models::{AssetKind, AssetStatus, CutFormat, CutStatus, EpisodeStatus, Provider};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn script_repo(&self) -> repositories::script::ScriptRepository {
        repositories::script::ScriptRepository::new(self.conn.clone())
    }

    fn cut_repo(&self) -> repositories::cut::CutRepository {
        repositories::cut::CutRepository::new(self.conn.clone())
    }

    fn asset_repo(&self) -> repositories::asset::AssetRepository {
        repositories::asset::AssetRepository::new(self.conn.clone())
    }

    fn avatar_repo(&self) -> repositories::avatar::AvatarRepository {
        repositories::avatar::AvatarRepository::new(self.conn.clone())
    }

    // ========== Episodes ==========

    pub async fn create_episode(
        &self,
        series: &str,
        episode_number: i32,
        title: &str,
        premise: Option<&str>,
        publish_date_target: Option<&str>,
    ) -> Result<episode::Model> {
        self.episode_repo()
            .create(series, episode_number, title, premise, publish_date_target)
            .await
    }

    pub async fn get_episode(&self, id: &str) -> Result<Option<episode::Model>> {
        self.episode_repo().get(id).await
    }

    pub async fn list_episodes(
        &self,
        series: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<episode::Model>> {
        self.episode_repo().list(series, status).await
    }

    pub async fn set_episode_status(&self, id: &str, status: EpisodeStatus) -> Result<()> {
        self.episode_repo().set_status(id, status).await
    }

    pub async fn publish_episode(&self, id: &str, external_video_id: Option<&str>) -> Result<()> {
        self.episode_repo().publish(id, external_video_id).await
    }

    pub async fn remove_episode(&self, id: &str) -> Result<bool> {
        self.episode_repo().remove(id).await
    }

    // ========== Scripts ==========

    pub async fn insert_canonical_script(
        &self,
        episode_id: &str,
        content: &str,
        model: Option<&str>,
    ) -> Result<script::Model> {
        self.script_repo()
            .insert_canonical(episode_id, content, model)
            .await
    }

    pub async fn insert_script_variant(
        &self,
        episode_id: &str,
        content: &str,
        model: Option<&str>,
    ) -> Result<script::Model> {
        self.script_repo()
            .insert_variant(episode_id, content, model)
            .await
    }

    pub async fn get_script(&self, id: &str) -> Result<Option<script::Model>> {
        self.script_repo().get(id).await
    }

    pub async fn canonical_script(&self, episode_id: &str) -> Result<Option<script::Model>> {
        self.script_repo().canonical_for_episode(episode_id).await
    }

    pub async fn list_scripts(&self, episode_id: &str) -> Result<Vec<script::Model>> {
        self.script_repo().list_for_episode(episode_id).await
    }

    // ========== Cuts ==========

    pub async fn create_cut(
        &self,
        episode_id: &str,
        script_id: &str,
        format: CutFormat,
    ) -> Result<cut::Model> {
        self.cut_repo().create(episode_id, script_id, format).await
    }

    pub async fn get_cut(&self, id: &str) -> Result<Option<cut::Model>> {
        self.cut_repo().get(id).await
    }

    pub async fn list_cuts(&self, episode_id: &str) -> Result<Vec<cut::Model>> {
        self.cut_repo().list_for_episode(episode_id).await
    }

    pub async fn cut_exists_for_format(&self, episode_id: &str, format: CutFormat) -> Result<bool> {
        self.cut_repo().exists_for_format(episode_id, format).await
    }

    pub async fn set_cut_status(&self, id: &str, status: CutStatus) -> Result<()> {
        self.cut_repo().set_status(id, status).await
    }

    pub async fn set_cut_rendered(&self, id: &str, video_url: &str) -> Result<()> {
        self.cut_repo().set_rendered(id, video_url).await
    }

    // ========== Assets ==========

    pub async fn create_processing_asset(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
        kind: AssetKind,
        provider: Provider,
        provider_job_id: &str,
        prompt: &str,
    ) -> Result<asset::Model> {
        self.asset_repo()
            .create_processing(episode_id, cut_id, kind, provider, provider_job_id, prompt)
            .await
    }

    pub async fn create_pending_asset(
        &self,
        episode_id: &str,
        kind: AssetKind,
        prompt: &str,
    ) -> Result<asset::Model> {
        self.asset_repo()
            .create_pending(episode_id, kind, prompt)
            .await
    }

    pub async fn get_asset(&self, id: &str) -> Result<Option<asset::Model>> {
        self.asset_repo().get(id).await
    }

    pub async fn find_asset_by_job_id(&self, job_id: &str) -> Result<Option<asset::Model>> {
        self.asset_repo().find_by_job_id(job_id).await
    }

    pub async fn has_processing_asset_for_target(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
        provider: Provider,
    ) -> Result<bool> {
        self.asset_repo()
            .has_processing_for_target(episode_id, cut_id, provider)
            .await
    }

    pub async fn complete_asset(&self, id: &str, url: &str) -> Result<()> {
        self.asset_repo().complete(id, url).await
    }

    pub async fn fail_asset(&self, id: &str, error: &str, error_code: Option<&str>) -> Result<()> {
        self.asset_repo().fail(id, error, error_code).await
    }

    pub async fn list_assets(&self, episode_id: &str) -> Result<Vec<asset::Model>> {
        self.asset_repo().list_for_episode(episode_id).await
    }

    pub async fn list_assets_by_status(&self, status: AssetStatus) -> Result<Vec<asset::Model>> {
        self.asset_repo().list_by_status(status).await
    }

    pub async fn list_stale_processing_assets(&self, cutoff: &str) -> Result<Vec<asset::Model>> {
        self.asset_repo().list_stale_processing(cutoff).await
    }

    pub async fn touch_asset(&self, id: &str) -> Result<()> {
        self.asset_repo().touch(id).await
    }

    // ========== Avatars ==========

    pub async fn create_avatar(
        &self,
        name: &str,
        provider_avatar_id: &str,
        voice_id: Option<&str>,
        is_default: bool,
    ) -> Result<avatar::Model> {
        self.avatar_repo()
            .create(name, provider_avatar_id, voice_id, is_default)
            .await
    }

    pub async fn get_avatar(&self, id: &str) -> Result<Option<avatar::Model>> {
        self.avatar_repo().get(id).await
    }

    pub async fn get_default_avatar(&self) -> Result<Option<avatar::Model>> {
        self.avatar_repo().get_default().await
    }

    pub async fn list_avatars(&self) -> Result<Vec<avatar::Model>> {
        self.avatar_repo().list().await
    }
}
