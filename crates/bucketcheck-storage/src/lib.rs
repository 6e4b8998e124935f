#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![allow(clippy::result_large_err, clippy::large_enum_variant)]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "bucketcheck_storage::client";
pub const TRACING_TARGET_OPERATIONS: &str = "bucketcheck_storage::operations";
pub const TRACING_TARGET_BUCKETS: &str = "bucketcheck_storage::buckets";
pub const TRACING_TARGET_OBJECTS: &str = "bucketcheck_storage::objects";

pub mod client;
pub mod operations;
pub mod types;

// Re-export for convenience
pub use crate::client::{StorageClient, StorageConfig, StorageCredentials};
pub use crate::operations::{
    BucketOperations, DownloadResult, ListObjectsResult, ObjectOperations, UploadResult,
};
pub use crate::types::{BucketInfo, ObjectInfo};

/// S3 error code returned when creating a bucket that the caller already owns.
const CODE_BUCKET_ALREADY_OWNED: &str = "BucketAlreadyOwnedByYou";

/// S3 error codes that indicate a missing bucket or object.
const CODES_NOT_FOUND: [&str; 2] = ["NoSuchBucket", "NoSuchKey"];

/// String accessor for [`minio::s3::error::ErrorCode`], which the minio
/// crate does not provide; the names mirror `ErrorCode::parse`.
trait ErrorCodeExt {
    fn as_str(&self) -> &str;
}

impl ErrorCodeExt for minio::s3::error::ErrorCode {
    fn as_str(&self) -> &str {
        use minio::s3::error::ErrorCode;
        match self {
            ErrorCode::NoError => "NoError",
            ErrorCode::PermanentRedirect => "PermanentRedirect",
            ErrorCode::Redirect => "Redirect",
            ErrorCode::BadRequest => "BadRequest",
            ErrorCode::RetryHead => "RetryHead",
            ErrorCode::NoSuchBucket => "NoSuchBucket",
            ErrorCode::NoSuchBucketPolicy => "NoSuchBucketPolicy",
            ErrorCode::ReplicationConfigurationNotFoundError => {
                "ReplicationConfigurationNotFoundError"
            }
            ErrorCode::ServerSideEncryptionConfigurationNotFoundError => {
                "ServerSideEncryptionConfigurationNotFoundError"
            }
            ErrorCode::NoSuchTagSet => "NoSuchTagSet",
            ErrorCode::NoSuchObjectLockConfiguration => "NoSuchObjectLockConfiguration",
            ErrorCode::NoSuchLifecycleConfiguration => "NoSuchLifecycleConfiguration",
            ErrorCode::NoSuchKey => "NoSuchKey",
            ErrorCode::ResourceNotFound => "ResourceNotFound",
            ErrorCode::MethodNotAllowed => "MethodNotAllowed",
            ErrorCode::ResourceConflict => "ResourceConflict",
            ErrorCode::AccessDenied => "AccessDenied",
            ErrorCode::NotSupported => "NotSupported",
            ErrorCode::BucketNotEmpty => "BucketNotEmpty",
            ErrorCode::BucketAlreadyOwnedByYou => "BucketAlreadyOwnedByYou",
            ErrorCode::InvalidWriteOffset => "InvalidWriteOffset",
            ErrorCode::OtherError(code) => code.as_str(),
        }
    }
}

/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes invalid configuration parameters, missing required
    /// settings, malformed endpoint URLs, or a client that could not be
    /// built from the resolved configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found.
    ///
    /// This occurs when trying to access a bucket or object that doesn't exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation failed.
    ///
    /// This includes stream reading failures while draining object content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying storage client error.
    ///
    /// This wraps errors from the `minio` crate, including S3 error
    /// responses from the backend.
    #[error("Storage client error: {0}")]
    Client(#[from] minio::s3::error::Error),
}

impl Error {
    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns the S3 error code carried by the backend response, if any.
    pub fn s3_error_code(&self) -> Option<&str> {
        match self {
            Error::Client(minio::s3::error::Error::S3Error(response)) => {
                Some(response.code.as_str())
            }
            _ => None,
        }
    }

    /// Returns whether this error indicates a missing bucket or object.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            _ => self
                .s3_error_code()
                .is_some_and(|code| CODES_NOT_FOUND.contains(&code)),
        }
    }

    /// Returns whether this error means the bucket already exists and is
    /// owned by the calling credentials.
    ///
    /// Creating such a bucket again is idempotent for the diagnostic flow,
    /// so callers treat this as success rather than failure. A conflicting
    /// bucket owned by someone else (`BucketAlreadyExists`) stays an error.
    pub fn is_bucket_already_owned(&self) -> bool {
        self.s3_error_code()
            .is_some_and(|code| code == CODE_BUCKET_ALREADY_OWNED)
    }
}

/// Specialized [`Result`] type for storage operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_classification() {
        let error = Error::Config("bad endpoint".to_string());
        assert!(error.is_config_error());
        assert!(!error.is_not_found());
        assert!(!error.is_bucket_already_owned());
        assert!(error.s3_error_code().is_none());
    }

    #[test]
    fn not_found_variant_classification() {
        let error = Error::NotFound("bucket 'demo' does not exist".to_string());
        assert!(error.is_not_found());
        assert!(!error.is_config_error());
    }

    #[test]
    fn io_error_is_not_owned_conflict() {
        let error = Error::Io(std::io::Error::other("stream closed"));
        assert!(!error.is_bucket_already_owned());
        assert!(!error.is_not_found());
    }

    #[test]
    fn known_code_tables() {
        assert!(CODES_NOT_FOUND.contains(&"NoSuchBucket"));
        assert!(CODES_NOT_FOUND.contains(&"NoSuchKey"));
        assert_eq!(CODE_BUCKET_ALREADY_OWNED, "BucketAlreadyOwnedByYou");
    }
}
