//! Environment-driven object store smoke check.
//!
//! Reads `S3_ENDPOINT`, `S3_ACCESS_KEY`, `S3_SECRET_KEY` and `S3_USE_TLS`,
//! runs the five-step smoke checklist, and exits 0 only when every step
//! passed.

#![forbid(unsafe_code)]

use std::process;

use bucketcheck_cli::checklist::smoke;
use bucketcheck_cli::{SmokeArgs, TRACING_TARGET_CHECKS, telemetry};
use bucketcheck_storage::StorageClient;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let passed = match run().await {
        Ok(passed) => passed,
        Err(error) => {
            if tracing::enabled!(tracing::Level::ERROR) {
                tracing::error!(
                    target: TRACING_TARGET_CHECKS,
                    error = %error,
                    "smoke check terminated with error"
                );
            } else {
                eprintln!("Error: {error:#}");
            }
            process::exit(1);
        }
    };

    process::exit(if passed { 0 } else { 1 });
}

/// Builds the client from the environment and runs the checklist.
async fn run() -> anyhow::Result<bool> {
    let args = SmokeArgs::init();
    telemetry::init_tracing();
    telemetry::log_build_info();
    args.log();

    let config = args.storage_config()?;
    let client = StorageClient::new(config)?;

    let report = smoke::run(&client).await;
    Ok(report.finish())
}
