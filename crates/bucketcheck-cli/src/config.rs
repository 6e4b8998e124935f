//! CLI configuration for both checklist binaries.
//!
//! The binaries are meant to run with no arguments inside a pod or CI job,
//! so every value can be supplied through the environment:
//!
//! ```bash
//! # Environment-driven smoke check
//! S3_ENDPOINT=localhost:9000 S3_ACCESS_KEY=... S3_SECRET_KEY=... bucketcheck
//!
//! # COSI credential-document check
//! COSI_BUCKET_INFO_PATH=/data/cosi/BucketInfo bucketcheck-cosi
//! ```
//!
//! Flags with the same names exist for local runs; `--help` lists them.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use bucketcheck_cosi::{ConnectionInfo, DEFAULT_BUCKET_INFO_PATH};
use bucketcheck_storage::{StorageConfig, StorageCredentials};
use clap::Parser;
use url::Url;

use crate::TRACING_TARGET_CONFIG;

/// Environment variables the smoke check cannot run without.
const REQUIRED_ENV_VARS: &str = "S3_ENDPOINT, S3_ACCESS_KEY, S3_SECRET_KEY";

/// Configuration for the environment-driven smoke check.
///
/// # Environment Variables
///
/// - `S3_ENDPOINT` - Object store endpoint, with or without a scheme
/// - `S3_ACCESS_KEY` - Access key ID
/// - `S3_SECRET_KEY` - Secret access key
/// - `S3_USE_TLS` - "true" to use https when the endpoint has no scheme
///   (default: "false")
#[derive(Debug, Clone, Parser)]
#[command(name = "bucketcheck")]
#[command(about = "Runs a smoke checklist against an S3-compatible object store")]
#[command(version)]
pub struct SmokeArgs {
    /// Object store endpoint, e.g. "localhost:9000" or "https://rgw.svc:443".
    #[arg(long, env = "S3_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Access key ID.
    #[arg(long, env = "S3_ACCESS_KEY")]
    pub access_key: Option<String>,

    /// Secret access key.
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Whether to speak TLS to an endpoint that does not name a scheme.
    ///
    /// Compared case-insensitively against "true"; every other value means
    /// plain http.
    #[arg(long, env = "S3_USE_TLS", default_value = "false")]
    pub use_tls: String,
}

impl SmokeArgs {
    /// Loads environment variables from .env file (if enabled) and parses
    /// CLI arguments.
    pub fn init() -> Self {
        load_dotenv();
        Self::parse()
    }

    /// Returns whether the TLS flag is set.
    #[must_use]
    pub fn use_tls(&self) -> bool {
        self.use_tls.trim().eq_ignore_ascii_case("true")
    }

    /// Validates that all required values are present and non-empty.
    ///
    /// Missing values are reported together so a misconfigured job surfaces
    /// its whole problem in one run.
    ///
    /// # Errors
    ///
    /// Returns an error naming every missing variable.
    pub fn validate(&self) -> anyhow::Result<()> {
        let missing: Vec<&str> = [
            ("S3_ENDPOINT", &self.endpoint),
            ("S3_ACCESS_KEY", &self.access_key),
            ("S3_SECRET_KEY", &self.secret_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(anyhow!(
                "missing required environment variables: {}. Required: {REQUIRED_ENV_VARS}",
                missing.join(", ")
            ));
        }

        Ok(())
    }

    /// Resolves the endpoint into a full URL.
    ///
    /// An endpoint without a scheme gets one from the TLS flag. An endpoint
    /// that already names a scheme keeps it; the flag is only consulted for
    /// a conflict warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not parse as a URL.
    pub fn endpoint_url(&self) -> anyhow::Result<Url> {
        let raw = self.endpoint.as_deref().unwrap_or_default().trim();

        let with_scheme = if raw.contains("://") {
            raw.to_owned()
        } else {
            let scheme = if self.use_tls() { "https" } else { "http" };
            format!("{scheme}://{raw}")
        };

        let url = Url::parse(&with_scheme)
            .with_context(|| format!("invalid S3_ENDPOINT value: {raw}"))?;

        if raw.contains("://") && (url.scheme() == "https") != self.use_tls() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                scheme = %url.scheme(),
                use_tls = self.use_tls(),
                "Endpoint scheme overrides the S3_USE_TLS flag"
            );
        }

        Ok(url)
    }

    /// Builds the storage configuration from the parsed arguments.
    ///
    /// Certificate verification is relaxed because the check targets test
    /// clusters with self-signed certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if required values are missing or the endpoint is
    /// not a usable URL.
    pub fn storage_config(&self) -> anyhow::Result<StorageConfig> {
        self.validate()?;

        let endpoint = self.endpoint_url()?;
        let credentials = StorageCredentials::new(
            self.access_key.as_deref().unwrap_or_default(),
            self.secret_key.as_deref().unwrap_or_default(),
        );

        let config = StorageConfig::new(endpoint, credentials)
            .context("failed to build storage configuration")?
            .with_accept_invalid_certs(true);

        Ok(config)
    }

    /// Logs the effective configuration without sensitive values.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            endpoint = self.endpoint.as_deref().unwrap_or("<unset>"),
            use_tls = self.use_tls(),
            access_key_set = self.access_key.is_some(),
            secret_key_set = self.secret_key.is_some(),
            "Smoke check configuration"
        );
    }
}

/// Configuration for the COSI credential-document check.
///
/// # Environment Variables
///
/// - `COSI_BUCKET_INFO_PATH` - Path to the mounted `BucketInfo` document
///   (default: `/data/cosi/BucketInfo`)
#[derive(Debug, Clone, Parser)]
#[command(name = "bucketcheck-cosi")]
#[command(about = "Verifies a COSI-provisioned bucket using its mounted credential document")]
#[command(version)]
pub struct CosiArgs {
    /// Path to the mounted BucketInfo credential document.
    #[arg(long, env = "COSI_BUCKET_INFO_PATH", default_value = DEFAULT_BUCKET_INFO_PATH)]
    pub bucket_info_path: PathBuf,
}

impl CosiArgs {
    /// Loads environment variables from .env file (if enabled) and parses
    /// CLI arguments.
    pub fn init() -> Self {
        load_dotenv();
        Self::parse()
    }

    /// Logs the effective configuration.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            bucket_info_path = %self.bucket_info_path.display(),
            "COSI check configuration"
        );
    }
}

/// Builds the storage configuration from a loaded credential document.
///
/// The document's region replaces the default, and certificate verification
/// is relaxed for the same reason as the smoke check.
///
/// # Errors
///
/// Returns an error if the document's endpoint is not a usable URL.
pub fn storage_config_from_connection(connection: &ConnectionInfo) -> anyhow::Result<StorageConfig> {
    let endpoint = connection
        .endpoint_url()
        .context("credential document endpoint is not a valid URL")?;
    let credentials =
        StorageCredentials::new(connection.access_key.clone(), connection.secret_key.clone());

    let config = StorageConfig::new(endpoint, credentials)
        .context("failed to build storage configuration")?
        .with_region(connection.region.clone())
        .with_accept_invalid_certs(true);

    Ok(config)
}

/// Loads environment variables from .env file if the dotenv feature is
/// enabled.
///
/// This runs before clap parses arguments so that `env` attributes can pick
/// up values from .env files.
#[cfg(feature = "dotenv")]
fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("Warning: failed to load .env file: {err}");
    }
}

/// No-op when dotenv feature is disabled.
#[cfg(not(feature = "dotenv"))]
fn load_dotenv() {}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoke_args(endpoint: Option<&str>, use_tls: &str) -> SmokeArgs {
        SmokeArgs {
            endpoint: endpoint.map(str::to_owned),
            access_key: Some("AKIAIOSFODNN7".to_owned()),
            secret_key: Some("secret".to_owned()),
            use_tls: use_tls.to_owned(),
        }
    }

    #[test]
    fn validate_reports_all_missing_variables() {
        let args = SmokeArgs {
            endpoint: None,
            access_key: Some(String::new()),
            secret_key: None,
            use_tls: "false".to_owned(),
        };

        let message = args.validate().unwrap_err().to_string();
        assert!(message.contains("S3_ENDPOINT"));
        assert!(message.contains("S3_ACCESS_KEY"));
        assert!(message.contains("S3_SECRET_KEY"));
    }

    #[test]
    fn validate_accepts_complete_configuration() {
        let args = smoke_args(Some("localhost:9000"), "false");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn tls_flag_is_case_insensitive() {
        assert!(smoke_args(None, "TRUE").use_tls());
        assert!(smoke_args(None, "true").use_tls());
        assert!(!smoke_args(None, "false").use_tls());
        assert!(!smoke_args(None, "yes").use_tls());
        assert!(!smoke_args(None, "").use_tls());
    }

    #[test]
    fn bare_endpoint_gets_scheme_from_tls_flag() {
        let url = smoke_args(Some("localhost:9000"), "false")
            .endpoint_url()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/");

        let url = smoke_args(Some("rgw.svc:443"), "true")
            .endpoint_url()
            .unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn explicit_scheme_wins_over_tls_flag() {
        let url = smoke_args(Some("https://rgw.svc"), "false")
            .endpoint_url()
            .unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn storage_config_relaxes_certificate_verification() {
        let config = smoke_args(Some("https://rgw.svc"), "true")
            .storage_config()
            .unwrap();
        assert!(config.accept_invalid_certs);
        assert!(config.path_style);
        assert_eq!(config.credentials.access_key(), "AKIAIOSFODNN7");
    }

    #[test]
    fn storage_config_rejects_incomplete_configuration() {
        let args = SmokeArgs {
            endpoint: Some("localhost:9000".to_owned()),
            access_key: None,
            secret_key: None,
            use_tls: "false".to_owned(),
        };
        assert!(args.storage_config().is_err());
    }

    #[test]
    fn connection_info_builds_storage_config_with_document_region() {
        let connection = ConnectionInfo {
            endpoint: "https://rook-ceph-rgw.svc".to_owned(),
            region: "eu-central-1".to_owned(),
            access_key: "AKIA1234".to_owned(),
            secret_key: "secret".to_owned(),
            bucket_name: "provisioned".to_owned(),
        };

        let config = storage_config_from_connection(&connection).unwrap();
        assert_eq!(config.region, "eu-central-1");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn cosi_defaults_to_the_mount_path() {
        let args = CosiArgs::try_parse_from(["bucketcheck-cosi"]).unwrap();
        assert_eq!(args.bucket_info_path, PathBuf::from(DEFAULT_BUCKET_INFO_PATH));
    }
}
