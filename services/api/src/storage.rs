//! Image storage backed by S3
//!
//! Uploaded entity images are written to a bucket under a per-entity folder
//! and the public object URL is stored on the entity record.

use anyhow::Result;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tracing::info;
use uuid::Uuid;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket receiving entity images
    pub bucket: String,
    /// Base URL under which uploaded objects are publicly reachable
    pub public_base_url: String,
}

impl StorageConfig {
    /// Create a new StorageConfig from environment variables
    ///
    /// # Environment Variables
    /// - `S3_BUCKET`: Bucket name (required, fatal when absent)
    /// - `S3_PUBLIC_URL`: Public base URL (default: the bucket's AWS URL)
    pub fn from_env() -> Result<Self> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| anyhow::anyhow!("S3_BUCKET environment variable not set"))?;

        let public_base_url = std::env::var("S3_PUBLIC_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.amazonaws.com", bucket));

        Ok(StorageConfig {
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// S3-backed image store
#[derive(Clone)]
pub struct ImageStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl ImageStore {
    /// Initialize the store using ambient AWS credentials
    pub async fn new(config: StorageConfig) -> Self {
        let aws_config =
            aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        ImageStore {
            client: Client::new(&aws_config),
            bucket: config.bucket,
            public_base_url: config.public_base_url,
        }
    }

    /// Upload image bytes under the given folder and return the public URL
    pub async fn upload(
        &self,
        folder: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let key = format!(
            "{}/{}.{}",
            folder,
            Uuid::new_v4(),
            extension_for(content_type)
        );

        info!("Uploading image to s3://{}/{}", self.bucket, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn extension_follows_content_type() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("application/octet-stream"), "bin");
    }

    #[test]
    #[serial]
    fn config_requires_bucket() {
        unsafe {
            std::env::remove_var("S3_BUCKET");
        }
        assert!(StorageConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn config_derives_public_url_from_bucket() {
        unsafe {
            std::env::set_var("S3_BUCKET", "getaway-images");
            std::env::remove_var("S3_PUBLIC_URL");
        }

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(
            config.public_base_url,
            "https://getaway-images.s3.amazonaws.com"
        );

        unsafe {
            std::env::remove_var("S3_BUCKET");
        }
    }

    #[test]
    #[serial]
    fn config_trims_trailing_slash() {
        unsafe {
            std::env::set_var("S3_BUCKET", "getaway-images");
            std::env::set_var("S3_PUBLIC_URL", "https://cdn.getaway.example/");
        }

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.public_base_url, "https://cdn.getaway.example");

        unsafe {
            std::env::remove_var("S3_BUCKET");
            std::env::remove_var("S3_PUBLIC_URL");
        }
    }
}
