#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for configuration handling.
pub const TRACING_TARGET_CONFIG: &str = "bucketcheck_cli::config";
/// Tracing target for checklist execution.
pub const TRACING_TARGET_CHECKS: &str = "bucketcheck_cli::checks";

pub mod checklist;
pub mod config;
pub mod report;
pub mod telemetry;

pub use crate::config::{CosiArgs, SmokeArgs};
pub use crate::report::{CheckReport, StepRecord, StepStatus};
