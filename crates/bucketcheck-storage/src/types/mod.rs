//! Data types describing buckets and objects.
//!
//! These are the backend-independent views the operations layer returns:
//! enough to print listings and metadata without exposing `minio` response
//! types to callers.

mod bucket_info;
mod object_info;

pub use bucket_info::BucketInfo;
pub use object_info::ObjectInfo;
