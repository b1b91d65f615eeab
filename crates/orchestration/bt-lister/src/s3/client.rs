//! S3 client for listing.
//!
//! Only what a listing client needs: where to connect, which credentials
//! to use, and how long a single list call may take. Buckets and prefixes
//! are per call and never part of the configuration.

use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use bt_error::{BtError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default per-operation timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CREDENTIALS_PROVIDER: &str = "bt-lister";

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for the S3 listing client.
///
/// Unset fields fall back to the standard AWS provider chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    /// Region; the provider chain decides when unset
    pub region: Option<String>,

    /// Endpoint override. Setting one switches to path-style addressing,
    /// which LocalStack and most S3-compatible stores require.
    pub endpoint: Option<String>,

    pub access_key: Option<String>,
    pub secret_key: Option<String>,

    /// Named profile from the shared AWS config files
    pub profile: Option<String>,

    /// Upper bound on one list call, retries included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            profile: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl S3Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use a static access key pair instead of the provider chain.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Check the settings before any client is built.
    ///
    /// A lone access key or secret key is rejected rather than silently
    /// falling back to the provider chain.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(BtError::Config("S3 timeout must be at least 1 second".to_string()));
        }

        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(BtError::Config(
                "S3 access key and secret key must be given together".to_string(),
            ));
        }

        if self.endpoint.as_deref().is_some_and(str::is_empty) {
            return Err(BtError::Config("S3 endpoint must not be empty".to_string()));
        }

        Ok(())
    }

    fn static_credentials(&self) -> Option<Credentials> {
        match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => Some(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                CREDENTIALS_PROVIDER,
            )),
            _ => None,
        }
    }

    fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(self.timeout_secs))
            .build()
    }

    async fn load_sdk_config(&self) -> SdkConfig {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).timeout_config(self.timeout_config());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(credentials) = self.static_credentials() {
            loader = loader.credentials_provider(credentials);
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        loader.load().await
    }
}

/// Build a listing client from `config`.
///
/// Fails with [`BtError::Config`] if the settings are inconsistent. No
/// request is sent; connectivity problems surface on the first list call.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    config.validate()?;

    let sdk_config = config.load_sdk_config().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint.is_some())
        .build();

    debug!(
        region = ?s3_config.region(),
        endpoint = ?config.endpoint,
        static_credentials = config.access_key.is_some(),
        timeout_secs = config.timeout_secs,
        "Created S3 client"
    );

    Ok(Client::from_conf(s3_config))
}
