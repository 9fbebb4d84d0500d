//! JobStatus value object - the aggregated result the build system observes

use serde::{Deserialize, Serialize};

/// Overall status of the invoking job, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Success,
    /// Soft failure: the job continues but is flagged
    Unstable,
    Failure,
}

impl JobStatus {
    /// Combine two statuses, keeping the worse one
    pub fn worst(self, other: JobStatus) -> JobStatus {
        self.max(other)
    }

    /// Status used when at least one deploy attempt failed
    pub fn for_failed_run(on_failure: bool) -> JobStatus {
        if on_failure {
            JobStatus::Failure
        } else {
            JobStatus::Unstable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Success => "SUCCESS",
            JobStatus::Unstable => "UNSTABLE",
            JobStatus::Failure => "FAILURE",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_keeps_failure() {
        assert_eq!(JobStatus::Success.worst(JobStatus::Unstable), JobStatus::Unstable);
        assert_eq!(JobStatus::Failure.worst(JobStatus::Unstable), JobStatus::Failure);
    }

    #[test]
    fn failed_run_policy() {
        assert_eq!(JobStatus::for_failed_run(true), JobStatus::Failure);
        assert_eq!(JobStatus::for_failed_run(false), JobStatus::Unstable);
    }

    #[test]
    fn serde_uses_build_system_names() {
        let json = serde_json::to_string(&JobStatus::Unstable).unwrap();
        assert_eq!(json, "\"UNSTABLE\"");
    }
}
