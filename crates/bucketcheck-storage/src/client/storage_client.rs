//! High-level storage client construction.
//!
//! This module builds the configured `minio` client behind a thin wrapper
//! that owns the resolved configuration and hands out operation groups.

use std::sync::Arc;

use minio::s3::Client;
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use tracing::{error, info, instrument};

use crate::operations::{BucketOperations, ObjectOperations};
use crate::{Error, Result, StorageConfig, TRACING_TARGET_CLIENT};

/// High-level client for one S3-compatible endpoint.
///
/// Construction resolves the endpoint into a base URL, fixes the signing
/// region and addressing style, and applies the transport relaxations the
/// configuration asks for. The client is cheap to clone and read-only
/// after construction.
#[derive(Clone)]
pub struct StorageClient {
    inner: Client,
    config: Arc<StorageConfig>,
}

impl StorageClient {
    /// Creates a new storage client with the provided configuration.
    ///
    /// This builds the client but does not touch the network; the first
    /// operation does.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The endpoint cannot be parsed into a base URL
    /// - Client initialization fails
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bucketcheck_storage::{StorageClient, StorageConfig, StorageCredentials};
    /// use url::Url;
    ///
    /// let endpoint = Url::parse("http://localhost:9000").unwrap();
    /// let credentials = StorageCredentials::new("access_key", "secret_key");
    /// let config = StorageConfig::new(endpoint, credentials).unwrap();
    /// let client = StorageClient::new(config).unwrap();
    /// ```
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(endpoint = %config.endpoint_masked()))]
    pub fn new(config: StorageConfig) -> Result<Self> {
        info!(target: TRACING_TARGET_CLIENT, "Initializing storage client");

        config.validate().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
            e
        })?;

        let provider = StaticProvider::from(config.credentials().clone());

        // The base URL carries the scheme, so TLS on/off follows the
        // endpoint; region and addressing style come from the config.
        let endpoint_url = config.endpoint().to_string();

        let mut base_url: BaseUrl = endpoint_url.parse().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Invalid endpoint URL");
            Error::Config(format!("Invalid endpoint URL: {}", e))
        })?;

        base_url.region = config.region().to_string();
        base_url.virtual_style = !config.path_style;

        let ignore_cert_check = config.accept_invalid_certs.then_some(true);

        let provider = Box::new(provider);
        let inner = Client::new(base_url, Some(provider), None, ignore_cert_check).map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Failed to create storage client");
            Error::Config(format!("Failed to build storage client: {}", e))
        })?;

        info!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint_masked(),
            region = %config.region(),
            secure = config.is_secure(),
            path_style = config.path_style,
            accept_invalid_certs = config.accept_invalid_certs,
            "Storage client initialized successfully"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration this client was built from.
    #[inline]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Creates a new BucketOperations instance.
    pub fn bucket_operations(&self) -> BucketOperations {
        BucketOperations::new(self.clone())
    }

    /// Creates a new ObjectOperations instance.
    pub fn object_operations(&self) -> ObjectOperations {
        ObjectOperations::new(self.clone())
    }

    /// Returns a reference to the inner client.
    #[inline]
    pub(crate) fn as_inner(&self) -> &Client {
        &self.inner
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("endpoint", &self.config.endpoint_masked())
            .field("region", &self.config.region)
            .field("secure", &self.config.is_secure())
            .field("path_style", &self.config.path_style)
            .field("accept_invalid_certs", &self.config.accept_invalid_certs)
            .field("access_key", &self.config.credentials().access_key_masked())
            .finish()
    }
}
