//! S3 backed store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{ObjectStore, StoreError, validate_key};

/// Connection settings for an S3 bucket.
///
/// Only static credentials are used: the key pair set here, else
/// `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` (with an optional
/// `AWS_SESSION_TOKEN`). Shared config profiles, SSO and instance or task
/// roles are not resolved, so opening a store without either source fails
/// with [`StoreError::Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// Region of the bucket.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key id. Falls back to `AWS_ACCESS_KEY_ID`.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key. Falls back to `AWS_SECRET_ACCESS_KEY`.
    #[serde(default)]
    pub secret_access_key: Option<String>,
}

fn default_region() -> String {
    "eu-central-1".to_string()
}

impl S3Config {
    /// Creates a config for a bucket in the default region.
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    fn credentials(&self) -> Result<Credentials, StoreError> {
        let key_id = self
            .access_key_id
            .clone()
            .or_else(|| std::env::var("AWS_ACCESS_KEY_ID").ok());
        let secret = self
            .secret_access_key
            .clone()
            .or_else(|| std::env::var("AWS_SECRET_ACCESS_KEY").ok());
        let session_token = std::env::var("AWS_SESSION_TOKEN").ok();

        match (key_id, secret) {
            (Some(key_id), Some(secret)) => Ok(Credentials::new(
                key_id,
                secret,
                session_token,
                None,
                "xetra",
            )),
            _ => Err(StoreError::Request(format!(
                "no credentials configured for bucket '{}'",
                self.bucket
            ))),
        }
    }
}

/// An S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Creates a store for the configured bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if neither the config nor the `AWS_*` environment
    /// variables hold a key pair.
    pub fn new(config: &S3Config) -> Result<Self, StoreError> {
        let mut builder = aws_sdk_s3::Config::builder()
            .region(Region::new(config.region.clone()))
            .credentials_provider(config.credentials()?)
            .behavior_version(BehaviorVersion::latest());

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone()).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn request_error(err: impl std::error::Error) -> StoreError {
    StoreError::Request(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(request_error)?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!(bucket = %self.bucket, objects = keys.len(), "listed bucket");
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StoreError::NotFound(key.to_string())
                } else {
                    request_error(e)
                }
            })?;

        let body = response.body.collect().await.map_err(request_error)?;
        Ok(body.into_bytes())
    }

    async fn put(&self, key: &str, body: Bytes) -> Result<(), StoreError> {
        validate_key(key)?;
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(request_error)?;

        tracing::debug!(bucket = %self.bucket, key, bytes = size, "stored object");
        Ok(())
    }

    fn location(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = S3Config::new("xetra-1234");
        assert_eq!(config.bucket, "xetra-1234");
        assert_eq!(config.region, "eu-central-1");
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_store_with_explicit_credentials() {
        let config = S3Config {
            access_key_id: Some("key".to_string()),
            secret_access_key: Some("secret".to_string()),
            endpoint: Some("http://localhost:9000".to_string()),
            ..S3Config::new("xetra-1234-etl-target-bucket")
        };

        let store = S3Store::new(&config).unwrap();
        assert_eq!(store.bucket(), "xetra-1234-etl-target-bucket");
        assert_eq!(store.location(), "s3://xetra-1234-etl-target-bucket");
    }
}
