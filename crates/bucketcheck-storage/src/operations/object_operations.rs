//! Object operations for S3-compatible storage.
//!
//! Upload, download, metadata fetch, deletion, and listing. Each operation
//! maps to exactly one backend call and returns a typed result the
//! diagnostic checklists can print from.

use bytes::Bytes;
use futures::StreamExt;
use minio::s3::segmented_bytes::SegmentedBytes;
use minio::s3::types::{S3Api, ToStream};
use tracing::{debug, error, info, instrument};

use crate::types::ObjectInfo;
use crate::{Error, Result, StorageClient, TRACING_TARGET_OBJECTS};

/// Result of an upload operation.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Object key that was uploaded.
    pub key: String,
    /// Size of the uploaded object in bytes.
    pub size: u64,
    /// ETag of the uploaded object.
    pub etag: String,
    /// Upload duration.
    pub duration: std::time::Duration,
}

/// Result of a download operation.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// Object key that was downloaded.
    pub key: String,
    /// Size of the downloaded object in bytes.
    pub size: u64,
    /// Content type reported by the backend.
    pub content_type: Option<String>,
    /// Download duration.
    pub duration: std::time::Duration,
}

/// Result of a list objects operation (a single page).
#[derive(Debug, Clone)]
pub struct ListObjectsResult {
    /// Objects on this page.
    pub objects: Vec<ObjectInfo>,
    /// Continuation token for pagination.
    pub next_continuation_token: Option<String>,
    /// Whether the result is truncated.
    pub is_truncated: bool,
}

impl ListObjectsResult {
    /// Returns whether any entry on this page carries the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.objects.iter().any(|object| object.key == key)
    }
}

/// Object operations bound to a storage client.
#[derive(Debug, Clone)]
pub struct ObjectOperations {
    client: StorageClient,
}

impl ObjectOperations {
    /// Creates new ObjectOperations with a storage client.
    pub fn new(client: StorageClient) -> Self {
        Self { client }
    }

    /// Uploads an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    #[instrument(skip(self, data), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %key))]
    pub async fn upload_object<T: AsRef<[u8]> + Send>(
        &self,
        bucket: &str,
        key: &str,
        data: T,
    ) -> Result<UploadResult> {
        let data_ref = data.as_ref();
        let size = data_ref.len() as u64;

        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            key = %key,
            size = %size,
            "Uploading object"
        );

        let start = std::time::Instant::now();

        let bytes_data = Bytes::copy_from_slice(data_ref);
        let segmented_data = SegmentedBytes::from(bytes_data);

        let result = self
            .client
            .as_inner()
            .put_object(bucket, key, segmented_data)
            .send()
            .await
            .map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let etag = response.etag;

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    size = %size,
                    etag = %etag,
                    elapsed = ?elapsed,
                    "Object uploaded successfully"
                );

                Ok(UploadResult {
                    key: key.to_string(),
                    size,
                    etag,
                    duration: elapsed,
                })
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to upload object"
                );
                Err(e)
            }
        }
    }

    /// Downloads an object and drains its content into memory.
    ///
    /// The diagnostic payloads are tiny, so buffering the whole body is
    /// fine here.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the object doesn't exist.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %key))]
    pub async fn download_object(&self, bucket: &str, key: &str) -> Result<(Bytes, DownloadResult)> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            key = %key,
            "Downloading object"
        );

        let start = std::time::Instant::now();

        let result = self
            .client
            .as_inner()
            .get_object(bucket, key)
            .send()
            .await
            .map_err(Error::Client);

        match result {
            Ok(response) => {
                // Extract the content type before consuming the response
                let content_type = response
                    .headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);

                let segmented = response
                    .content
                    .to_segmented_bytes()
                    .await
                    .map_err(Error::Io)?;
                let data = segmented.to_bytes();

                let size = data.len() as u64;
                let elapsed = start.elapsed();

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    size = %size,
                    elapsed = ?elapsed,
                    "Object downloaded successfully"
                );

                Ok((
                    data,
                    DownloadResult {
                        key: key.to_string(),
                        size,
                        content_type,
                        duration: elapsed,
                    },
                ))
            }
            Err(e) => {
                let elapsed = start.elapsed();
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to download object"
                );
                Err(e)
            }
        }
    }

    /// Lists objects in a bucket with optional prefix filtering.
    ///
    /// Returns the first page of the listing; `is_truncated` signals when
    /// more pages exist. The diagnostic buckets hold at most a handful of
    /// objects, so one page is all the checklists need.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket))]
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<ListObjectsResult> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            prefix = ?prefix,
            "Listing objects"
        );

        let start = std::time::Instant::now();

        let mut list_request = self.client.as_inner().list_objects(bucket);

        if let Some(p) = prefix {
            list_request = list_request.prefix(Some(p.to_string()));
        }

        let mut stream = list_request.to_stream().await;

        let result = stream.next().await;

        let elapsed = start.elapsed();

        match result {
            Some(Ok(response)) => {
                let objects: Vec<ObjectInfo> = response
                    .contents
                    .into_iter()
                    .map(|entry| {
                        let mut object_info =
                            ObjectInfo::new(entry.name, entry.size.unwrap_or(0) as u64);

                        if let Some(last_modified) = entry.last_modified {
                            object_info = object_info.with_last_modified(last_modified);
                        }

                        if let Some(etag) = entry.etag {
                            object_info = object_info.with_etag(etag);
                        }

                        object_info
                    })
                    .collect();

                let is_truncated = response.is_truncated;
                let next_continuation_token = response.next_continuation_token;

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    count = objects.len(),
                    is_truncated = %is_truncated,
                    elapsed = ?elapsed,
                    "Objects listed successfully"
                );

                Ok(ListObjectsResult {
                    objects,
                    next_continuation_token,
                    is_truncated,
                })
            }
            Some(Err(e)) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to list objects"
                );
                Err(Error::Client(e))
            }
            None => {
                // Empty stream means no objects
                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    count = 0,
                    elapsed = ?elapsed,
                    "No objects found"
                );
                Ok(ListObjectsResult {
                    objects: Vec::new(),
                    next_continuation_token: None,
                    is_truncated: false,
                })
            }
        }
    }

    /// Deletes an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %key))]
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            key = %key,
            "Deleting object"
        );

        let start = std::time::Instant::now();

        let result = self
            .client
            .as_inner()
            .delete_object(bucket, key)
            .send()
            .await
            .map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(_) => {
                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    elapsed = ?elapsed,
                    "Object deleted successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to delete object"
                );
                Err(e)
            }
        }
    }

    /// Fetches object metadata without downloading the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the object doesn't exist or the stat call fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %key))]
    pub async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectInfo> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            key = %key,
            "Fetching object metadata"
        );

        let start = std::time::Instant::now();

        let result = self
            .client
            .as_inner()
            .stat_object(bucket, key)
            .send()
            .await
            .map_err(Error::Client);

        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let size = response.size as u64;

                let mut object_info = ObjectInfo::new(key, size).with_etag(response.etag);

                if let Some(last_modified) = response.last_modified {
                    object_info = object_info.with_last_modified(last_modified);
                }

                if let Some(content_type) = response
                    .headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                {
                    object_info = object_info.with_content_type(content_type);
                }

                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    size = %size,
                    elapsed = ?elapsed,
                    "Object metadata retrieved successfully"
                );

                Ok(object_info)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to fetch object metadata"
                );
                Err(e)
            }
        }
    }
}
