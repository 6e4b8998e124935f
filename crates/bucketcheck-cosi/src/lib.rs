#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_LOADER: &str = "bucketcheck_cosi::loader";

pub mod connection;
pub mod document;
pub mod loader;

// Re-export for convenience
pub use crate::connection::ConnectionInfo;
pub use crate::document::{CredentialDocument, FlatCredentials, NestedCredentials};
pub use crate::loader::{DEFAULT_BUCKET_INFO_PATH, LoadedDocument, load_from_path};

/// Error type for credential document handling.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// The credential document does not exist at the expected path.
    ///
    /// For a COSI-provisioned pod this means the BucketInfo volume was
    /// never mounted, which is fatal for the diagnostic run.
    #[error("Credential document not found at {path}: {source}")]
    NotFound {
        /// Path that was probed.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The credential document is not valid JSON, or matches neither
    /// accepted shape.
    #[error("Credential document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The credential document exists but could not be read.
    #[error("Failed to read credential document at {path}: {source}")]
    Unexpected {
        /// Path that was read.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resolved connection details are unusable.
    ///
    /// This covers empty required fields and endpoints that do not parse
    /// as URLs.
    #[error("Invalid connection details: {0}")]
    Invalid(String),
}

impl Error {
    /// Returns whether this error means the document file was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns whether this error means the document failed to parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Malformed(_))
    }
}

/// Specialized [`Result`] type for credential document handling.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let error = Error::NotFound {
            path: "/data/cosi/BucketInfo".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(error.is_not_found());
        assert!(!error.is_malformed());
    }

    #[test]
    fn malformed_classification() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = Error::Malformed(parse_error);
        assert!(error.is_malformed());
        assert!(!error.is_not_found());
    }
}
