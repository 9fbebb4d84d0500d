//! DeployAttempt entity - outcome of pushing one archive through one adapter

use std::path::PathBuf;
use std::time::Duration;

use crate::error::DeployError;

/// What happened to one (archive, adapter) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Deployed,
    Failed(DeployError),
}

/// One deploy attempt, recorded in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployAttempt {
    pub archive: PathBuf,
    pub adapter: String,
    pub target: String,
    pub context_path: String,
    pub status: AttemptStatus,
    pub elapsed: Duration,
}

impl DeployAttempt {
    pub fn is_success(&self) -> bool {
        matches!(self.status, AttemptStatus::Deployed)
    }

    /// Failure cause, if the attempt failed
    pub fn error(&self) -> Option<&DeployError> {
        match &self.status {
            AttemptStatus::Deployed => None,
            AttemptStatus::Failed(err) => Some(err),
        }
    }
}
