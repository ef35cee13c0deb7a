//! Object storage for rendered videos. Finished renders are copied out of
//! the provider and served from our own bucket, keyed as
//! `videos/{episode_id}/{asset_id}.mp4`.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::config::StorageConfig;

pub fn video_key(episode_id: &str, asset_id: &str) -> String {
    format!("videos/{}/{}.mp4", episode_id, asset_id)
}

/// Seam over the blob store so the completion path can be tested without
/// a bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under the key and return the public URL they are
    /// served from.
    async fn put_bytes(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;
}

/// S3-compatible store (S3 proper or Cloudflare R2).
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Store {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        if config.bucket.is_empty() {
            return Err(anyhow!("storage bucket is not configured"));
        }

        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "studio",
        );

        let mut builder = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true);
        if !config.endpoint_url.is_empty() {
            builder = builder.endpoint_url(&config.endpoint_url);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_bytes(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        debug!("Uploading {} bytes to {}", data.len(), key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| anyhow!("Blob upload failed for {}: {}", key, e))?;

        let url = format!("{}/{}", self.public_base_url, key);
        info!("Stored {}", url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_key_layout() {
        assert_eq!(video_key("ep-1", "asset-2"), "videos/ep-1/asset-2.mp4");
    }
}
