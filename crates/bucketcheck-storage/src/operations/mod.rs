//! Storage operations for buckets and objects.
//!
//! This module provides the thin operation layer the diagnostic checklists
//! run on: bucket creation/existence/listing and object
//! upload/download/stat/delete/listing. Every operation is a single
//! backend call that logs its outcome and elapsed time; classification of
//! ambiguous outcomes (owned-bucket conflicts, not-found responses) is
//! left to [`crate::Error`] helpers so callers decide what counts as
//! failure.

mod bucket_operations;
mod object_operations;

pub use bucket_operations::BucketOperations;
pub use object_operations::{DownloadResult, ListObjectsResult, ObjectOperations, UploadResult};
