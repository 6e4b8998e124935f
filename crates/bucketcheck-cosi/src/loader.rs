//! Loading the credential document from its mount path.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::document::{CredentialDocument, redact_secret};
use crate::{ConnectionInfo, Error, Result, TRACING_TARGET_LOADER};

/// Where a COSI provisioner mounts the credential document.
pub const DEFAULT_BUCKET_INFO_PATH: &str = "/data/cosi/BucketInfo";

/// A credential document read from disk.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The raw document with the secret key masked, for console display.
    pub redacted: Value,
    /// The resolved connection details. Not yet validated.
    pub connection: ConnectionInfo,
}

impl LoadedDocument {
    /// Pretty-prints the redacted document.
    pub fn redacted_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.redacted).unwrap_or_else(|_| self.redacted.to_string())
    }
}

/// Reads and parses the credential document at `path`.
///
/// Resolution happens here, once: the returned connection details carry
/// the defaults for absent fields. Validation does not, so callers can
/// show the (redacted) document to the operator before rejecting it.
///
/// # Errors
///
/// - [`Error::NotFound`] when the file is absent
/// - [`Error::Malformed`] when it is not JSON or matches neither shape
/// - [`Error::Unexpected`] for any other read failure
pub fn load_from_path(path: impl AsRef<Path>) -> Result<LoadedDocument> {
    let path = path.as_ref();

    debug!(
        target: TRACING_TARGET_LOADER,
        path = %path.display(),
        "Loading credential document"
    );

    let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => Error::Unexpected {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let raw: Value = serde_json::from_str(&contents)?;
    let document: CredentialDocument = serde_json::from_value(raw.clone())?;

    let connection = document.into_connection_info();

    info!(
        target: TRACING_TARGET_LOADER,
        path = %path.display(),
        bucket = %connection.bucket_name,
        access_key = %connection.access_key_masked(),
        "Credential document loaded"
    );

    Ok(LoadedDocument {
        redacted: redact_secret(raw),
        connection,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_document(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BucketInfo");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_nested_document() {
        let (_dir, path) = write_document(
            r#"{"spec": {"bucketName": "demo", "secretS3": {
                "endpoint": "http://localhost:9000",
                "accessKeyID": "access",
                "accessSecretKey": "secret"
            }}}"#,
        );

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.connection.bucket_name, "demo");
        assert_eq!(loaded.connection.endpoint, "http://localhost:9000");
        assert_eq!(loaded.connection.region, "us-east-1");
        assert!(loaded.connection.validate().is_ok());
    }

    #[test]
    fn loads_flat_document() {
        let (_dir, path) = write_document(
            r#"{"bucketName": "flat", "endpoint": "http://localhost:9000",
                "accessKeyID": "access", "accessSecretKey": "secret"}"#,
        );

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.connection.bucket_name, "flat");
    }

    #[test]
    fn redacted_dump_masks_the_secret() {
        let (_dir, path) = write_document(
            r#"{"bucketName": "flat", "endpoint": "http://localhost:9000",
                "accessKeyID": "access", "accessSecretKey": "supersecret"}"#,
        );

        let loaded = load_from_path(&path).unwrap();
        let dump = loaded.redacted_pretty();
        assert!(!dump.contains("supersecret"));
        assert!(dump.contains("***"));
        assert!(dump.contains("flat"));
        // The resolved connection still carries the real secret.
        assert_eq!(loaded.connection.secret_key, "supersecret");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BucketInfo");

        let error = load_from_path(&path).unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn invalid_json_is_malformed() {
        let (_dir, path) = write_document("{not json at all");

        let error = load_from_path(&path).unwrap_err();
        assert!(error.is_malformed());
    }

    #[test]
    fn directory_is_an_unexpected_read_error() {
        let dir = tempfile::tempdir().unwrap();

        let error = load_from_path(dir.path()).unwrap_err();
        assert!(matches!(error, Error::Unexpected { .. }));
    }

    #[test]
    fn incomplete_document_loads_but_fails_validation() {
        let (_dir, path) = write_document(r#"{"spec": {"bucketName": "only-name"}}"#);

        let loaded = load_from_path(&path).unwrap();
        assert!(loaded.connection.validate().is_err());
    }
}
