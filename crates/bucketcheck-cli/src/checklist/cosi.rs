//! COSI bucket verification checklist.
//!
//! Seven steps against a bucket another party provisioned: confirm the
//! bucket exists, upload a test object, list the bucket, download the
//! object back and verify it, inspect its metadata, delete it, and list
//! again to confirm the deletion took.

use std::time::Instant;

use bucketcheck_storage::StorageClient;

use super::verify_round_trip;
use crate::report::CheckReport;

/// Key of the test object uploaded into the provisioned bucket.
pub const TEST_OBJECT_KEY: &str = "cosi-test-file.txt";
/// Content of the test object.
pub const TEST_OBJECT_CONTENT: &str =
    "Hello from COSI! This file was uploaded via the COSI bucket access.";

/// Number of steps in the verification checklist.
const TOTAL_STEPS: usize = 7;

/// Runs the verification checklist against `bucket` and returns its report.
///
/// The checklist never creates the bucket; a missing bucket is a finding,
/// not something to repair. The run stops at the first failed step.
pub async fn run(client: &StorageClient, bucket: &str) -> CheckReport {
    let mut report = CheckReport::new("COSI bucket verification", TOTAL_STEPS);
    report.start();

    let buckets = client.bucket_operations();
    let objects = client.object_operations();

    let start = Instant::now();
    match buckets.bucket_exists(bucket).await {
        Ok(true) => report.pass(
            "bucket-exists",
            format!("bucket '{bucket}' exists"),
            start.elapsed(),
        ),
        Ok(false) => {
            report.fail(
                "bucket-exists",
                format!("bucket '{bucket}' does not exist (the provisioner should have created it)"),
                start.elapsed(),
            );
            return report;
        }
        Err(err) => {
            report.fail(
                "bucket-exists",
                format!("could not check bucket '{bucket}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects
        .upload_object(bucket, TEST_OBJECT_KEY, TEST_OBJECT_CONTENT)
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
    match objects.list_objects(bucket, None).await {
        Ok(listing) => {
            report.pass(
                "list-objects",
                format!("{} object(s) in '{bucket}'", listing.objects.len()),
                start.elapsed(),
            );
            for object in &listing.objects {
                report.note(format!("  - {} ({} bytes)", object.key, object.size));
            }
            if listing.objects.is_empty() {
                report.note("  (no objects listed)");
            }
        }
        Err(err) => {
            report.fail(
                "list-objects",
                format!("could not list objects in '{bucket}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects.download_object(bucket, TEST_OBJECT_KEY).await {
        Ok((data, _)) => match verify_round_trip(TEST_OBJECT_CONTENT, &data) {
            Ok(content) => {
                report.pass(
                    "download-verify",
                    format!("downloaded content matches ({} bytes)", content.len()),
                    start.elapsed(),
                );
                report.note(format!("  content: {content}"));
            }
            Err(detail) => {
                report.fail("download-verify", detail, start.elapsed());
                return report;
            }
        },
        Err(err) => {
            report.fail(
                "download-verify",
                format!("could not download '{TEST_OBJECT_KEY}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects.stat_object(bucket, TEST_OBJECT_KEY).await {
        Ok(info) => {
            report.pass(
                "stat-object",
                format!("metadata for '{}'", info.key),
                start.elapsed(),
            );
            report.note(format!("  size: {} bytes", info.size));
            report.note(format!(
                "  content-type: {}",
                info.content_type.as_deref().unwrap_or("unknown")
            ));
            report.note(format!(
                "  last-modified: {}",
                info.last_modified
                    .map_or_else(|| "unknown".to_owned(), |ts| ts.to_rfc3339())
            ));
            report.note(format!(
                "  etag: {}",
                info.etag.as_deref().unwrap_or("unknown")
            ));
        }
        Err(err) => {
            report.fail(
                "stat-object",
                format!("could not stat '{TEST_OBJECT_KEY}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects.delete_object(bucket, TEST_OBJECT_KEY).await {
        Ok(()) => report.pass(
            "delete-object",
            format!("deleted '{TEST_OBJECT_KEY}'"),
            start.elapsed(),
        ),
        Err(err) => {
            report.fail(
                "delete-object",
                format!("could not delete '{TEST_OBJECT_KEY}': {err}"),
                start.elapsed(),
            );
            return report;
        }
    }

    let start = Instant::now();
    match objects.list_objects(bucket, None).await {
        Ok(listing) => {
            if listing.contains_key(TEST_OBJECT_KEY) {
                report.fail(
                    "verify-deletion",
                    format!("'{TEST_OBJECT_KEY}' is still listed after deletion"),
                    start.elapsed(),
                );
            } else {
                report.pass(
                    "verify-deletion",
                    format!("'{TEST_OBJECT_KEY}' no longer listed"),
                    start.elapsed(),
                );
            }
        }
        Err(err) => report.fail(
            "verify-deletion",
            format!("could not list objects in '{bucket}': {err}"),
            start.elapsed(),
        ),
    }

    report
}
