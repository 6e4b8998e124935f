//! Bucket information structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name.
    pub name: String,
    /// Bucket creation date, when the backend reports one.
    pub creation_date: Option<DateTime<Utc>>,
}

impl BucketInfo {
    /// Creates a new BucketInfo.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }

    /// Sets the creation date.
    pub fn with_creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_info_new() {
        let info = BucketInfo::new("test-bucket");
        assert_eq!(info.name, "test-bucket");
        assert!(info.creation_date.is_none());
    }

    #[test]
    fn test_bucket_info_with_creation_date() {
        let now = Utc::now();
        let info = BucketInfo::new("test-bucket").with_creation_date(now);
        assert_eq!(info.creation_date, Some(now));
    }
}
