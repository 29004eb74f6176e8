//! Storage gateway configuration.

use vermeer_error::{ConfigError, VermeerResult};

/// Credentials and bucket coordinates for the gateway.
///
/// All fields come from the environment. Construction fails fast with a
/// descriptive error before any network call is attempted.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket name
    pub bucket: String,
    /// Bucket region
    pub region: String,
    /// Access key id
    pub access_key_id: String,
    /// Access key secret
    pub secret_access_key: String,
    /// Public base URL for stored objects, without trailing slash
    pub public_base: String,
}

fn required(name: &str) -> VermeerResult<String> {
    std::env::var(name)
        .map_err(|_| ConfigError::new(format!("{name} is not set; storage uploads need it")))
        .map_err(Into::into)
}

impl StorageConfig {
    /// Load the configuration from the environment.
    ///
    /// Required: `STORAGE_BUCKET`, `STORAGE_REGION`, `STORAGE_ACCESS_KEY_ID`,
    /// `STORAGE_SECRET_ACCESS_KEY`. Optional: `STORAGE_PUBLIC_URL`, which
    /// defaults to `https://<bucket>.s3.<region>.amazonaws.com`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first missing variable.
    pub fn from_env() -> VermeerResult<Self> {
        let bucket = required("STORAGE_BUCKET")?;
        let region = required("STORAGE_REGION")?;
        let access_key_id = required("STORAGE_ACCESS_KEY_ID")?;
        let secret_access_key = required("STORAGE_SECRET_ACCESS_KEY")?;

        let public_base = std::env::var("STORAGE_PUBLIC_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.{region}.amazonaws.com"));
        let public_base = public_base.trim_end_matches('/').to_string();

        Ok(Self {
            bucket,
            region,
            access_key_id,
            secret_access_key,
            public_base,
        })
    }

    /// The `<bucket>.s3.<region>.amazonaws.com` host this gateway owns.
    pub fn native_host(&self) -> String {
        format!("{}.s3.{}.amazonaws.com", self.bucket, self.region)
    }
}
