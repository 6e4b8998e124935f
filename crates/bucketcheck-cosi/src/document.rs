//! The COSI `BucketInfo` credential document.
//!
//! Provisioners have shipped the same connection details in two shapes:
//! nested under `spec`/`spec.secretS3` (the COSI API object) or as flat
//! top-level keys. The document is parsed into a tagged union exactly
//! once; everything downstream works with the resolved
//! [`ConnectionInfo`](crate::ConnectionInfo).

use serde::Deserialize;
use serde_json::Value;

use crate::connection::ConnectionInfo;

/// Region assumed when the document does not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// A parsed credential document in one of its two accepted shapes.
///
/// Variant order matters: a document carrying a top-level `spec` key is
/// always the nested shape, so that variant is tried first and the two
/// parse paths are never mixed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CredentialDocument {
    /// COSI API object shape: fields under `spec` and `spec.secretS3`.
    Nested(NestedCredentials),
    /// Flat shape: the same field names at the document root.
    Flat(FlatCredentials),
}

impl CredentialDocument {
    /// Resolves the document into connection details.
    ///
    /// Absent fields have already been defaulted to empty strings by the
    /// parse (region to [`DEFAULT_REGION`]); an explicitly empty region is
    /// normalized to the default as well. Validation is the caller's
    /// explicit next step via [`ConnectionInfo::validate`].
    pub fn into_connection_info(self) -> ConnectionInfo {
        let (bucket_name, secret) = match self {
            Self::Nested(document) => (document.spec.bucket_name, document.spec.secret_s3),
            Self::Flat(document) => (
                document.bucket_name,
                SecretS3 {
                    endpoint: document.endpoint,
                    region: document.region,
                    access_key_id: document.access_key_id,
                    access_secret_key: document.access_secret_key,
                },
            ),
        };

        let region = if secret.region.is_empty() {
            default_region()
        } else {
            secret.region
        };

        ConnectionInfo {
            endpoint: secret.endpoint,
            region,
            access_key: secret.access_key_id,
            secret_key: secret.access_secret_key,
            bucket_name,
        }
    }

    /// Returns whether this document used the nested shape.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

/// The nested (COSI API object) document shape.
#[derive(Debug, Clone, Deserialize)]
pub struct NestedCredentials {
    /// The `spec` payload; its presence is what selects this shape.
    pub spec: DocumentSpec,
}

/// The `spec` payload of a nested document.
///
/// Real documents carry more fields (`authenticationType`, `protocols`,
/// object metadata); everything unknown is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSpec {
    /// Name of the provisioned bucket.
    #[serde(default)]
    pub bucket_name: String,

    /// S3 connection details.
    #[serde(default)]
    pub secret_s3: SecretS3,
}

/// The `secretS3` payload carrying endpoint and keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretS3 {
    /// Endpoint URL of the object store.
    #[serde(default)]
    pub endpoint: String,

    /// Signing region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Access key. The document spells the suffix `ID` in caps, which
    /// `rename_all` alone would not produce.
    #[serde(rename = "accessKeyID", default)]
    pub access_key_id: String,

    /// Secret key.
    #[serde(default)]
    pub access_secret_key: String,
}

impl Default for SecretS3 {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            access_secret_key: String::new(),
        }
    }
}

/// The flat document shape: nested field names hoisted to the root.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCredentials {
    /// Name of the provisioned bucket.
    #[serde(default)]
    pub bucket_name: String,

    /// Endpoint URL of the object store.
    #[serde(default)]
    pub endpoint: String,

    /// Signing region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Access key, spelled `accessKeyID` in the document.
    #[serde(rename = "accessKeyID", default)]
    pub access_key_id: String,

    /// Secret key.
    #[serde(default)]
    pub access_secret_key: String,
}

/// Returns a copy of the raw document with the secret key masked.
///
/// Both shapes are covered: `spec.secretS3.accessSecretKey` and the
/// top-level `accessSecretKey`. Used for the console dump of the loaded
/// document, which must never echo the real secret.
pub fn redact_secret(mut document: Value) -> Value {
    const MASK: &str = "***";

    if let Some(secret) = document
        .pointer_mut("/spec/secretS3/accessSecretKey")
        .filter(|value| value.is_string())
    {
        *secret = Value::String(MASK.to_string());
    }

    if let Some(secret) = document
        .pointer_mut("/accessSecretKey")
        .filter(|value| value.is_string())
    {
        *secret = Value::String(MASK.to_string());
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &str = r#"{
        "apiVersion": "objectstorage.k8s.io/v1alpha1",
        "kind": "BucketInfo",
        "spec": {
            "bucketName": "ceph-bucket-3deb4be1",
            "authenticationType": "KEY",
            "secretS3": {
                "endpoint": "https://rook-ceph-rgw.rook-ceph.svc:443",
                "region": "eu-west-2",
                "accessKeyID": "AKIACOSI1234",
                "accessSecretKey": "topsecret"
            },
            "protocols": ["s3"]
        }
    }"#;

    const FLAT: &str = r#"{
        "bucketName": "flat-bucket",
        "endpoint": "http://localhost:9000",
        "region": "us-west-1",
        "accessKeyID": "flataccess",
        "accessSecretKey": "flatsecret"
    }"#;

    #[test]
    fn parses_nested_document() {
        let document: CredentialDocument = serde_json::from_str(NESTED).unwrap();
        assert!(document.is_nested());

        let connection = document.into_connection_info();
        assert_eq!(connection.bucket_name, "ceph-bucket-3deb4be1");
        assert_eq!(connection.endpoint, "https://rook-ceph-rgw.rook-ceph.svc:443");
        assert_eq!(connection.region, "eu-west-2");
        assert_eq!(connection.access_key, "AKIACOSI1234");
        assert_eq!(connection.secret_key, "topsecret");
    }

    #[test]
    fn parses_flat_document() {
        let document: CredentialDocument = serde_json::from_str(FLAT).unwrap();
        assert!(!document.is_nested());

        let connection = document.into_connection_info();
        assert_eq!(connection.bucket_name, "flat-bucket");
        assert_eq!(connection.endpoint, "http://localhost:9000");
        assert_eq!(connection.region, "us-west-1");
        assert_eq!(connection.access_key, "flataccess");
        assert_eq!(connection.secret_key, "flatsecret");
    }

    #[test]
    fn nested_shape_wins_over_flat_keys() {
        // A document with both a `spec` key and flat keys must resolve
        // through the nested path only.
        let document: CredentialDocument = serde_json::from_str(
            r#"{
                "endpoint": "http://wrong:1",
                "accessKeyID": "wrong",
                "spec": {
                    "bucketName": "right-bucket",
                    "secretS3": {"endpoint": "http://right:9000", "accessKeyID": "right"}
                }
            }"#,
        )
        .unwrap();

        assert!(document.is_nested());
        let connection = document.into_connection_info();
        assert_eq!(connection.bucket_name, "right-bucket");
        assert_eq!(connection.endpoint, "http://right:9000");
        assert_eq!(connection.access_key, "right");
    }

    #[test]
    fn region_defaults_when_absent() {
        let nested: CredentialDocument = serde_json::from_str(
            r#"{"spec": {"bucketName": "b", "secretS3": {"endpoint": "http://e", "accessKeyID": "a", "accessSecretKey": "s"}}}"#,
        )
        .unwrap();
        assert_eq!(nested.into_connection_info().region, DEFAULT_REGION);

        let flat: CredentialDocument =
            serde_json::from_str(r#"{"bucketName": "b", "endpoint": "http://e"}"#).unwrap();
        assert_eq!(flat.into_connection_info().region, DEFAULT_REGION);
    }

    #[test]
    fn explicit_empty_region_normalizes_to_default() {
        let flat: CredentialDocument =
            serde_json::from_str(r#"{"bucketName": "b", "region": ""}"#).unwrap();
        assert_eq!(flat.into_connection_info().region, DEFAULT_REGION);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let document: CredentialDocument =
            serde_json::from_str(r#"{"spec": {"bucketName": "only-name"}}"#).unwrap();

        let connection = document.into_connection_info();
        assert_eq!(connection.bucket_name, "only-name");
        assert_eq!(connection.endpoint, "");
        assert_eq!(connection.access_key, "");
        assert_eq!(connection.secret_key, "");
        assert_eq!(connection.region, DEFAULT_REGION);
    }

    #[test]
    fn empty_document_resolves_to_flat_defaults() {
        let document: CredentialDocument = serde_json::from_str("{}").unwrap();
        assert!(!document.is_nested());

        let connection = document.into_connection_info();
        assert_eq!(connection.bucket_name, "");
        assert_eq!(connection.endpoint, "");
    }

    #[test]
    fn access_key_id_caps_spelling_is_required() {
        // "accessKeyId" (lowercase d) is not the documented field name and
        // must not populate the access key.
        let document: CredentialDocument =
            serde_json::from_str(r#"{"accessKeyId": "nope", "bucketName": "b"}"#).unwrap();
        assert_eq!(document.into_connection_info().access_key, "");
    }

    #[test]
    fn non_object_document_fails_to_parse() {
        assert!(serde_json::from_str::<CredentialDocument>("[1, 2]").is_err());
        assert!(serde_json::from_str::<CredentialDocument>("\"text\"").is_err());
    }

    #[test]
    fn redacts_nested_secret() {
        let raw: Value = serde_json::from_str(NESTED).unwrap();
        let redacted = redact_secret(raw);

        assert_eq!(
            redacted.pointer("/spec/secretS3/accessSecretKey"),
            Some(&Value::String("***".to_string()))
        );
        // Everything else survives untouched.
        assert_eq!(
            redacted.pointer("/spec/secretS3/accessKeyID"),
            Some(&Value::String("AKIACOSI1234".to_string()))
        );
    }

    #[test]
    fn redacts_flat_secret() {
        let raw: Value = serde_json::from_str(FLAT).unwrap();
        let redacted = redact_secret(raw);

        assert_eq!(
            redacted.pointer("/accessSecretKey"),
            Some(&Value::String("***".to_string()))
        );
        assert_eq!(
            redacted.pointer("/bucketName"),
            Some(&Value::String("flat-bucket".to_string()))
        );
    }

    #[test]
    fn redact_leaves_documents_without_secrets_alone() {
        let raw: Value = serde_json::from_str(r#"{"bucketName": "b"}"#).unwrap();
        let redacted = redact_secret(raw.clone());
        assert_eq!(redacted, raw);
    }
}
