//! Checklist reporting.
//!
//! A [`CheckReport`] prints one status line per executed step as it records
//! it, keeps the records for inspection, and closes with a banner that
//! states the overall verdict. Step lines go to stdout so the report reads
//! as a document; diagnostics stay on the tracing layer.

use std::time::Duration;

use crate::TRACING_TARGET_CHECKS;

/// Marker printed in front of a passed step.
const PASS_MARK: &str = "\u{2713}";
/// Marker printed in front of a failed step.
const FAIL_MARK: &str = "\u{2717}";
/// Horizontal rule used around the report header and the final banner.
const RULE: &str = "==================================================";

/// Outcome of a single checklist step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step completed and its expectation held.
    Passed,
    /// The step errored or its expectation was not met.
    Failed,
}

/// Record of one executed checklist step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Short stable name of the step.
    pub name: &'static str,
    /// Whether the step passed or failed.
    pub status: StepStatus,
    /// Human-readable outcome printed next to the marker.
    pub detail: String,
    /// Wall-clock time the step took.
    pub elapsed: Duration,
}

impl StepRecord {
    /// Returns whether this step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == StepStatus::Passed
    }
}

/// Console reporter for a checklist run.
///
/// Steps are numbered against the announced total, so a fail-fast run shows
/// how far it got, e.g. a report that stops at `[3/7]`.
#[derive(Debug)]
pub struct CheckReport {
    title: &'static str,
    total_steps: usize,
    steps: Vec<StepRecord>,
}

impl CheckReport {
    /// Creates an empty report for a checklist with `total_steps` steps.
    #[must_use]
    pub fn new(title: &'static str, total_steps: usize) -> Self {
        Self {
            title,
            total_steps,
            steps: Vec::with_capacity(total_steps),
        }
    }

    /// Prints the report header.
    pub fn start(&self) {
        println!("{}", self.title);
        println!("{RULE}");
    }

    /// Records and prints a passed step.
    pub fn pass(&mut self, name: &'static str, detail: impl Into<String>, elapsed: Duration) {
        self.record(name, StepStatus::Passed, detail.into(), elapsed);
    }

    /// Records and prints a failed step.
    pub fn fail(&mut self, name: &'static str, detail: impl Into<String>, elapsed: Duration) {
        self.record(name, StepStatus::Failed, detail.into(), elapsed);
    }

    /// Prints an informational line below the current step.
    ///
    /// Used for listings and echoed content; notes are not recorded and do
    /// not affect the verdict.
    pub fn note(&self, line: impl AsRef<str>) {
        println!("{}", line.as_ref());
    }

    /// Returns the recorded steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Returns the first failed step, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|step| !step.passed())
    }

    /// Returns whether every recorded step passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.first_failure().is_none()
    }

    /// Prints the final banner and returns the overall verdict.
    pub fn finish(&self) -> bool {
        println!();
        println!("{RULE}");
        match self.first_failure() {
            None => println!("All storage checks passed!"),
            Some(step) => println!("Storage checks FAILED at step '{}'", step.name),
        }
        println!("{RULE}");

        self.all_passed()
    }

    fn record(&mut self, name: &'static str, status: StepStatus, detail: String, elapsed: Duration) {
        let number = self.steps.len() + 1;

        match status {
            StepStatus::Passed => {
                println!(
                    "{PASS_MARK} [{number}/{}] {detail} ({}ms)",
                    self.total_steps,
                    elapsed.as_millis()
                );
                tracing::debug!(
                    target: TRACING_TARGET_CHECKS,
                    step = name,
                    detail = %detail,
                    elapsed = ?elapsed,
                    "Checklist step passed"
                );
            }
            StepStatus::Failed => {
                println!("{FAIL_MARK} [{number}/{}] {detail}", self.total_steps);
                tracing::error!(
                    target: TRACING_TARGET_CHECKS,
                    step = name,
                    detail = %detail,
                    elapsed = ?elapsed,
                    "Checklist step failed"
                );
            }
        }

        self.steps.push(StepRecord {
            name,
            status,
            detail,
            elapsed,
        });
    }
}
