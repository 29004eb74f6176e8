//! S3-backed gateway implementation.

use crate::classify::{ensure_scheme, parse_native_url, UrlClass, UrlClassifier};
use crate::media_kind::{content_type_for, extension_for, FALLBACK_CONTENT_TYPE};
use crate::{content_hash, ObjectStore, RawAsset, StorageConfig, StoredObject};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use url::Url;
use vermeer_error::{StorageError, StorageErrorKind, VermeerResult};

/// Cache directive applied to every upload.
///
/// Content-addressed keys never change their bytes, so the object can be
/// cached forever.
pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Object storage gateway over an S3 bucket.
///
/// Constructed once per run and passed by reference wherever it is needed;
/// there is no process-wide instance.
pub struct S3Storage {
    s3: Client,
    http: reqwest::Client,
    config: StorageConfig,
    classifier: UrlClassifier,
}

impl S3Storage {
    /// Create a gateway from a loaded configuration.
    #[tracing::instrument(skip(config), fields(bucket = %config.bucket, region = %config.region))]
    pub fn new(config: StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "vermeer",
        );
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .build();

        let classifier = UrlClassifier::new(config.public_base.clone(), config.native_host());

        tracing::info!(public_base = %config.public_base, "Created S3 storage gateway");
        Self {
            s3: Client::from_conf(s3_config),
            http: reqwest::Client::new(),
            config,
            classifier,
        }
    }

    /// The classifier for this gateway's bucket.
    pub fn classifier(&self) -> &UrlClassifier {
        &self.classifier
    }

    async fn download_native(&self, bucket: &str, key: &str) -> Option<RawAsset> {
        let response = self
            .s3
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| tracing::warn!(bucket, key, error = %e, "S3 download failed"))
            .ok()?;

        let content_type = response
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| tracing::warn!(bucket, key, error = %e, "S3 body read failed"))
            .ok()?
            .into_bytes();

        Some(RawAsset::new(bytes.to_vec(), content_type))
    }

    async fn download_http(&self, url: &str) -> Option<RawAsset> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| tracing::warn!(url, error = %e, "HTTP download failed"))
            .ok()?;

        if !response.status().is_success() {
            tracing::warn!(url, status = %response.status(), "HTTP download returned non-success");
            return None;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| tracing::warn!(url, error = %e, "HTTP body read failed"))
            .ok()?;

        Some(RawAsset::new(bytes.to_vec(), content_type))
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Storage {
    /// Download a source image.
    ///
    /// Store-native URLs go through the S3 API; everything else is fetched
    /// over plain HTTP with `https://` prefixed when the scheme is missing.
    /// Every failure is non-fatal and returns `None`.
    #[tracing::instrument(skip(self))]
    async fn download(&self, url: &str) -> Option<RawAsset> {
        let with_scheme = ensure_scheme(url);
        let Ok(parsed) = Url::parse(&with_scheme) else {
            tracing::warn!(url, "Skipping malformed URL");
            return None;
        };

        match parse_native_url(&parsed) {
            Some((bucket, _region, key)) => self.download_native(&bucket, &key).await,
            None => self.download_http(&with_scheme).await,
        }
    }

    /// Upload bytes under a content-addressed key.
    ///
    /// Identical bytes always land on the identical key, so a re-upload is a
    /// no-op overwrite. Upload failures are hard errors.
    #[tracing::instrument(skip(self, buffer), fields(size = buffer.len()))]
    async fn upload(
        &self,
        buffer: &[u8],
        namespace: &str,
        content_type: Option<&str>,
    ) -> VermeerResult<StoredObject> {
        let hash = content_hash(buffer);
        let key = format!("{namespace}/{hash}{}", extension_for(content_type));

        self.s3
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(ByteStream::from(buffer.to_vec()))
            .content_type(content_type_for(content_type))
            .acl(ObjectCannedAcl::PublicRead)
            .cache_control(CACHE_CONTROL)
            .send()
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Upload(key.clone(), e.to_string()))
            })?;

        let public_url = format!("{}/{}", self.classifier.public_base(), key);
        tracing::debug!(key = %key, "Uploaded object");

        Ok(StoredObject {
            public_url,
            key,
            content_hash: hash,
            byte_size: buffer.len(),
        })
    }

    /// Delete an object by public URL.
    ///
    /// Only URLs under this gateway's public base are eligible; anything else
    /// is a no-op returning `false`. Provider errors are swallowed into
    /// `false` — stale objects are an acceptable cost.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, url: &str) -> bool {
        let prefix = format!("{}/", self.classifier.public_base());
        let with_scheme = ensure_scheme(url);
        let Some(key) = with_scheme.strip_prefix(&prefix) else {
            return false;
        };
        if key.is_empty() {
            return false;
        }

        match self
            .s3
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => {
                tracing::debug!(key, "Deleted object");
                true
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Delete failed, leaving stale object");
                false
            }
        }
    }

    fn classify(&self, url: &str) -> UrlClass {
        self.classifier.classify(url)
    }
}
