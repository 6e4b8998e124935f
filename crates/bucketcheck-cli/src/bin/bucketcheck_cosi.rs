//! COSI credential-document bucket verification.
//!
//! Loads the `BucketInfo` document a COSI provisioner mounted at
//! `/data/cosi/BucketInfo`, prints it with the secret masked, then runs
//! the seven-step checklist against the provisioned bucket. Exits 0 only
//! when every step passed.

#![forbid(unsafe_code)]

use std::process;

use anyhow::Context;
use bucketcheck_cli::checklist::cosi;
use bucketcheck_cli::{CosiArgs, TRACING_TARGET_CHECKS, config, telemetry};
use bucketcheck_cosi::load_from_path;
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
                    "bucket verification terminated with error"
                );
            } else {
                eprintln!("Error: {error:#}");
            }
            process::exit(1);
        }
    };

    process::exit(if passed { 0 } else { 1 });
}

/// Loads the credential document, builds the client, runs the checklist.
///
/// The redacted document is printed before validation so a malformed or
/// incomplete document can be inspected from the job output.
async fn run() -> anyhow::Result<bool> {
    let args = CosiArgs::init();
    telemetry::init_tracing();
    telemetry::log_build_info();
    args.log();

    let loaded = load_from_path(&args.bucket_info_path).with_context(|| {
        format!(
            "failed to load bucket info from {}",
            args.bucket_info_path.display()
        )
    })?;

    println!("Loaded bucket info from {}:", args.bucket_info_path.display());
    println!("{}", loaded.redacted_pretty());
    println!();

    loaded
        .connection
        .validate()
        .context("credential document is incomplete")?;

    let config = config::storage_config_from_connection(&loaded.connection)?;
    let client = StorageClient::new(config)?;

    let report = cosi::run(&client, &loaded.connection.bucket_name).await;
    Ok(report.finish())
}
