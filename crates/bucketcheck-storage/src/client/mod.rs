//! Storage client with configuration management and operations.
//!
//! This module provides the interface for connecting to an S3-compatible
//! object store, managing client configuration, and obtaining bucket and
//! object operation handles. Configuration is validated before a client is
//! built, and everything the client logs masks credentials.

mod storage_client;
mod storage_config;
mod storage_credentials;

pub use storage_client::StorageClient;
pub use storage_config::StorageConfig;
pub use storage_credentials::StorageCredentials;
