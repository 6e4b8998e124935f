//! Object information structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a stored object, as reported by listings and
/// metadata fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification timestamp, when the backend reports one.
    pub last_modified: Option<DateTime<Utc>>,
    /// ETag (integrity tag) of the object.
    pub etag: Option<String>,
    /// Content type of the object.
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Creates a new ObjectInfo with the given key and size.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            etag: None,
            content_type: None,
        }
    }

    /// Sets the last modification timestamp.
    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Sets the ETag.
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_info_new() {
        let info = ObjectInfo::new("test.txt", 34);
        assert_eq!(info.key, "test.txt");
        assert_eq!(info.size, 34);
        assert!(info.last_modified.is_none());
        assert!(info.etag.is_none());
        assert!(info.content_type.is_none());
    }

    #[test]
    fn test_object_info_builders() {
        let now = Utc::now();
        let info = ObjectInfo::new("test.txt", 34)
            .with_last_modified(now)
            .with_etag("\"9b2cf535f27731c974343645a3985328\"")
            .with_content_type("text/plain");

        assert_eq!(info.last_modified, Some(now));
        assert_eq!(info.etag.as_deref(), Some("\"9b2cf535f27731c974343645a3985328\""));
        assert_eq!(info.content_type.as_deref(), Some("text/plain"));
    }
}
