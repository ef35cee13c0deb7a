use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub sora: SoraProviderConfig,

    pub heygen: HeyGenProviderConfig,

    pub llm: LlmProviderConfig,

    pub storage: StorageConfig,

    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/studio.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 7180,
            cors_allowed_origins: vec![
                "http://localhost:7180".to_string(),
                "http://127.0.0.1:7180".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoraProviderConfig {
    pub enabled: bool,

    pub base_url: String,

    /// Never written back to disk; set via config or OPENAI_API_KEY.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    pub model: String,
}

impl Default for SoraProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "sora-2".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeyGenProviderConfig {
    pub enabled: bool,

    pub base_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Voice used when neither the avatar record nor the request names one.
    pub default_voice_id: String,

    pub default_background_color: String,
}

impl Default for HeyGenProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.heygen.com".to_string(),
            api_key: String::new(),
            default_voice_id: crate::constants::DEFAULT_HEYGEN_VOICE.to_string(),
            default_background_color: crate::constants::DEFAULT_HEYGEN_BACKGROUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmProviderConfig {
    pub enabled: bool,

    pub base_url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    pub model: String,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub enabled: bool,

    /// S3 API endpoint; empty means AWS proper.
    pub endpoint_url: String,

    pub region: String,

    pub bucket: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_key_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret_access_key: String,

    /// Public base the bucket is served from; stored URLs are built by
    /// appending the object key to this.
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint_url: String::new(),
            region: "auto".to_string(),
            bucket: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Background poll loop on/off.
    pub enabled: bool,

    /// Seconds between status sweeps over PROCESSING renders.
    pub poll_interval_seconds: u64,

    /// Minutes a PROCESSING render may go without a status change before
    /// the reaper fails it.
    pub stale_after_minutes: u32,

    /// Defaults for `video wait` in the CLI.
    pub wait_poll_seconds: u64,

    pub wait_timeout_seconds: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_seconds: 30,
            stale_after_minutes: 45,
            wait_poll_seconds: 10,
            wait_timeout_seconds: 900,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub metrics_port: Option<u16>,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "studio".to_string());

        Self {
            metrics_enabled: true,
            metrics_port: None,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            sora: SoraProviderConfig::default(),
            heygen: HeyGenProviderConfig::default(),
            llm: LlmProviderConfig::default(),
            storage: StorageConfig::default(),
            pipeline: PipelineConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Secrets come from the environment when present so they stay out of
    /// config.toml.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if self.sora.api_key.is_empty() {
                self.sora.api_key = key.clone();
            }
            if self.llm.api_key.is_empty() {
                self.llm.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("HEYGEN_API_KEY") {
            if self.heygen.api_key.is_empty() {
                self.heygen.api_key = key;
            }
        }
        if let Ok(v) = std::env::var("STORAGE_ENDPOINT_URL") {
            self.storage.endpoint_url = v;
        }
        if let Ok(v) = std::env::var("STORAGE_BUCKET") {
            self.storage.bucket = v;
        }
        if let Ok(v) = std::env::var("STORAGE_ACCESS_KEY_ID") {
            self.storage.access_key_id = v;
        }
        if let Ok(v) = std::env::var("STORAGE_SECRET_ACCESS_KEY") {
            self.storage.secret_access_key = v;
        }
        if let Ok(v) = std::env::var("STORAGE_PUBLIC_BASE_URL") {
            self.storage.public_base_url = v;
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("studio").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".studio").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sora.enabled && self.sora.api_key.is_empty() {
            anyhow::bail!("Sora is enabled but no API key is configured (set OPENAI_API_KEY)");
        }

        if self.heygen.enabled && self.heygen.api_key.is_empty() {
            anyhow::bail!("HeyGen is enabled but no API key is configured (set HEYGEN_API_KEY)");
        }

        if self.llm.enabled && self.llm.api_key.is_empty() {
            anyhow::bail!(
                "Generation is enabled but no API key is configured (set OPENAI_API_KEY)"
            );
        }

        if self.storage.enabled {
            if self.storage.bucket.is_empty() {
                anyhow::bail!("Storage is enabled but no bucket is configured");
            }
            if self.storage.public_base_url.is_empty() {
                anyhow::bail!("Storage is enabled but public_base_url is not configured");
            }
        }

        if self.pipeline.enabled && self.pipeline.poll_interval_seconds == 0 {
            anyhow::bail!("Pipeline poll interval must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pipeline.poll_interval_seconds, 30);
        assert_eq!(config.pipeline.stale_after_minutes, 45);
        assert_eq!(config.server.port, 7180);
        assert_eq!(config.heygen.default_voice_id, "wayne");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[sora]"));
        assert!(toml_str.contains("[pipeline]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [pipeline]
            poll_interval_seconds = 5
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.pipeline.poll_interval_seconds, 5);

        assert_eq!(config.heygen.base_url, "https://api.heygen.com");
    }

    #[test]
    fn test_validate_rejects_missing_bucket() {
        let mut config = Config::default();
        config.sora.api_key = "k".to_string();
        config.heygen.api_key = "k".to_string();
        config.llm.api_key = "k".to_string();
        config.storage.enabled = true;
        assert!(config.validate().is_err());

        config.storage.bucket = "studio-media".to_string();
        config.storage.public_base_url = "https://media.example.com".to_string();
        assert!(config.validate().is_ok());
    }
}
