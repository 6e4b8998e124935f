//! Environment-driven smoke checklist.
//!
//! Five steps against an endpoint taken from the environment: create a
//! bucket, upload a small text object, list buckets, list the bucket's
//! objects, and download the object back to verify its content survived
//! the round trip.

use std::time::Instant;

use bucketcheck_storage::StorageClient;

use super::verify_round_trip;
use crate::report::CheckReport;

/// Bucket every smoke run creates (or reuses) for its test object.
pub const TEST_BUCKET: &str = "test-bucket";
/// Key of the uploaded test object.
pub const TEST_OBJECT_KEY: &str = "test.txt";
/// Content of the uploaded test object.
pub const TEST_OBJECT_CONTENT: &str = "Hello from Rook Ceph Object Store!";

/// Number of steps in the smoke checklist.
const TOTAL_STEPS: usize = 5;

/// Runs the smoke checklist and returns its report.
///
/// The run stops at the first failed step; call [`CheckReport::finish`] on
/// the returned report for the banner and the verdict.
pub async fn run(client: &StorageClient) -> CheckReport {
    let mut report = CheckReport::new("Object store smoke check", TOTAL_STEPS);
    report.start();

    let buckets = client.bucket_operations();
    let objects = client.object_operations();

    let start = Instant::now();
    match buckets.create_bucket(TEST_BUCKET).await {
        Ok(()) => report.pass(
            "create-bucket",
            format!("bucket '{TEST_BUCKET}' created"),
            start.elapsed(),
        ),
        Err(err) if err.is_bucket_already_owned() => report.pass(
            "create-bucket",
            format!("bucket '{TEST_BUCKET}' already exists (owned by us)"),
            start.elapsed(),
        ),
        Err(err) => {
            report.fail(
                "create-bucket",
                format!("could not create bucket '{TEST_BUCKET}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects
        .upload_object(TEST_BUCKET, TEST_OBJECT_KEY, TEST_OBJECT_CONTENT)
        .await
    {
        Ok(upload) => report.pass(
            "upload-object",
            format!("uploaded '{}' ({} bytes)", upload.key, upload.size),
            start.elapsed(),
        ),
        Err(err) => {
            report.fail(
                "upload-object",
                format!("could not upload '{TEST_OBJECT_KEY}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match buckets.list_buckets().await {
        Ok(listing) => {
            report.pass(
                "list-buckets",
                format!("{} bucket(s) visible", listing.len()),
                start.elapsed(),
            );
            for bucket in &listing {
                report.note(format!("  - {}", bucket.name));
            }
        }
        Err(err) => {
            report.fail(
                "list-buckets",
                format!("could not list buckets: {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects.list_objects(TEST_BUCKET, None).await {
        Ok(listing) => {
            report.pass(
                "list-objects",
                format!("{} object(s) in '{TEST_BUCKET}'", listing.objects.len()),
                start.elapsed(),
            );
            for object in &listing.objects {
                report.note(format!("  - {} ({} bytes)", object.key, object.size));
            }
        }
        Err(err) => {
            report.fail(
                "list-objects",
                format!("could not list objects in '{TEST_BUCKET}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects.download_object(TEST_BUCKET, TEST_OBJECT_KEY).await {
        Ok((data, _)) => match verify_round_trip(TEST_OBJECT_CONTENT, &data) {
            Ok(content) => {
                report.pass(
                    "download-verify",
                    format!("downloaded content matches ({} bytes)", content.len()),
                    start.elapsed(),
                );
                report.note(format!("  content: {content}"));
            }
            Err(detail) => report.fail("download-verify", detail, start.elapsed()),
        },
        Err(err) => report.fail(
            "download-verify",
            format!("could not download '{TEST_OBJECT_KEY}': {err}"),
            start.elapsed(),
        ),
    }

    report
}

#[cfg(test)]
mod tests {
    use bucketcheck_storage::{StorageConfig, StorageCredentials};
    use url::Url;

    use super::*;

    /// Runs the whole checklist against a live endpoint.
    ///
    /// Requires a reachable S3-compatible server, for example:
    ///
    /// ```bash
    /// BUCKETCHECK_TEST_ENDPOINT=http://localhost:9000 \
    /// cargo test -p bucketcheck-cli -- --ignored
    /// ```
    #[tokio::test]
    #[ignore = "requires a reachable S3-compatible endpoint"]
    async fn smoke_checklist_against_live_endpoint() {
        let Ok(endpoint) = std::env::var("BUCKETCHECK_TEST_ENDPOINT") else {
            return;
        };
        let access_key = std::env::var("BUCKETCHECK_TEST_ACCESS_KEY")
            .unwrap_or_else(|_| "minioadmin".to_owned());
        let secret_key = std::env::var("BUCKETCHECK_TEST_SECRET_KEY")
            .unwrap_or_else(|_| "minioadmin".to_owned());

        let config = StorageConfig::new(
            Url::parse(&endpoint).unwrap(),
            StorageCredentials::new(access_key, secret_key),
        )
        .unwrap()
        .with_accept_invalid_certs(true);
        let client = StorageClient::new(config).unwrap();

        let report = run(&client).await;
        assert!(report.all_passed(), "failed: {:?}", report.first_failure());
    }
}
