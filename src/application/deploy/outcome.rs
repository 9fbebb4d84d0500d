//! Deploy Outcome
//!
//! Result types for deploy runs.

use crate::domain::entities::DeployAttempt;
use crate::domain::value_objects::JobStatus;
use crate::error::DeployError;

/// Aggregated result of one deploy run
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// Attempts in execution order (archive-major, adapter-minor)
    pub attempts: Vec<DeployAttempt>,
    /// Number of archives the glob resolved to
    pub archive_count: usize,
    /// Attempts that never started because the job was cancelled
    pub skipped: usize,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
    /// Effective on-failure policy for this run
    pub on_failure: bool,
}

impl DeployOutcome {
    pub fn new(on_failure: bool) -> Self {
        Self {
            attempts: Vec::new(),
            archive_count: 0,
            skipped: 0,
            cancelled: false,
            on_failure,
        }
    }

    pub fn record(&mut self, attempt: DeployAttempt) {
        self.attempts.push(attempt);
    }

    pub fn mark_cancelled(&mut self, remaining: usize) {
        self.cancelled = true;
        self.skipped = remaining;
    }

    pub fn deployed_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.attempts.len() - self.deployed_count()
    }

    /// Errors of failed attempts, in execution order
    pub fn failures(&self) -> impl Iterator<Item = &DeployError> {
        self.attempts.iter().filter_map(|a| a.error())
    }

    /// Job status after applying the on-failure policy.
    ///
    /// A cancelled run counts as failed: not every target received the archive.
    pub fn status(&self) -> JobStatus {
        if self.failed_count() > 0 || self.cancelled {
            JobStatus::for_failed_run(self.on_failure)
        } else {
            JobStatus::Success
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == JobStatus::Success
    }
}
