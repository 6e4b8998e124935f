//! Resolved connection details.

use url::Url;

use crate::{Error, Result};

/// Everything needed to reach one provisioned bucket.
///
/// Immutable once resolved from a credential document; validation is an
/// explicit step so callers can display the document before rejecting it.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Endpoint URL of the object store.
    pub endpoint: String,
    /// Signing region (already defaulted by the parse).
    pub region: String,
    /// Access key.
    pub access_key: String,
    /// Secret key.
    pub secret_key: String,
    /// Name of the provisioned bucket.
    pub bucket_name: String,
}

impl ConnectionInfo {
    /// Checks that every field a client needs is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] naming each missing field.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();

        if self.endpoint.is_empty() {
            missing.push("endpoint");
        }
        if self.access_key.is_empty() {
            missing.push("accessKeyID");
        }
        if self.secret_key.is_empty() {
            missing.push("accessSecretKey");
        }
        if self.bucket_name.is_empty() {
            missing.push("bucketName");
        }

        if !missing.is_empty() {
            return Err(Error::Invalid(format!(
                "credential document is missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Parses the endpoint into a URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the endpoint is not a valid URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint)
            .map_err(|e| Error::Invalid(format!("endpoint '{}' is not a valid URL: {e}", self.endpoint)))
    }

    /// Returns whether the endpoint scheme is https.
    pub fn is_secure(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    /// Returns a masked version of the access key for logging.
    pub fn access_key_masked(&self) -> String {
        if self.access_key.len() <= 4 {
            "*".repeat(self.access_key.len())
        } else {
            format!("{}***", &self.access_key[..4])
        }
    }
}
