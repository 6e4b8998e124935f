//! Bucket operations for S3-compatible storage.

use minio::s3::types::S3Api;
use tracing::{debug, error, info, instrument};

use crate::types::BucketInfo;
use crate::{Error, Result, StorageClient, TRACING_TARGET_BUCKETS, TRACING_TARGET_OPERATIONS};

/// Bucket operations bound to a storage client.
#[derive(Debug, Clone)]
pub struct BucketOperations {
    client: StorageClient,
}

impl BucketOperations {
    /// Creates new BucketOperations with a storage client.
    pub fn new(client: StorageClient) -> Self {
        Self { client }
    }

    /// Creates a new bucket.
    ///
    /// Creating a bucket that already exists and is owned by the caller
    /// surfaces as an error here; use
    /// [`Error::is_bucket_already_owned`](crate::Error::is_bucket_already_owned)
    /// to treat that case as idempotent success.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket creation fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS, fields(bucket = %bucket_name))]
    pub async fn create_bucket(&self, bucket_name: &str) -> Result<()> {
        debug!(
            target: TRACING_TARGET_OPERATIONS,
            bucket = %bucket_name,
            "Creating bucket"
        );

        let start = std::time::Instant::now();
        let create_bucket_request = self.client.as_inner().create_bucket(bucket_name);
        let result = create_bucket_request.send().await.map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(_response) => {
                info!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket_name,
                    elapsed = ?elapsed,
                    "Bucket created successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket_name,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to create bucket"
                );
                Err(e)
            }
        }
    }

    /// Checks if a bucket exists.
    ///
    /// A missing bucket is `Ok(false)`, not an error; only a failed query
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS, fields(bucket = %bucket_name))]
    pub async fn bucket_exists(&self, bucket_name: &str) -> Result<bool> {
        debug!(
            target: TRACING_TARGET_OPERATIONS,
            bucket = %bucket_name,
            "Checking if bucket exists"
        );

        let start = std::time::Instant::now();
        let bucket_exists_request = self.client.as_inner().bucket_exists(bucket_name);
        let result = bucket_exists_request.send().await.map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let exists = response.exists;
                debug!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket_name,
                    exists = %exists,
                    elapsed = ?elapsed,
                    "Bucket existence check completed"
                );
                Ok(exists)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket_name,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to check bucket existence"
                );
                Err(e)
            }
        }
    }

    /// Lists all buckets visible to the credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket listing fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS)]
    pub async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        debug!(target: TRACING_TARGET_OPERATIONS, "Listing buckets");

        let start = std::time::Instant::now();
        let list_buckets_request = self.client.as_inner().list_buckets();
        let result = list_buckets_request.send().await.map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let buckets: Vec<BucketInfo> = response
                    .buckets
                    .into_iter()
                    .map(|bucket| {
                        BucketInfo::new(bucket.name).with_creation_date(bucket.creation_date)
                    })
                    .collect();

                info!(
                    target: TRACING_TARGET_BUCKETS,
                    count = buckets.len(),
                    elapsed = ?elapsed,
                    "Buckets listed successfully"
                );

                Ok(buckets)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to list buckets"
                );
                Err(e)
            }
        }
    }
}
