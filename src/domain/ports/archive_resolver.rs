//! Archive Resolver Port
//!
//! Turns the configured archive glob into concrete archives inside the job
//! workspace. Discovery rules belong to the implementation.

use std::path::Path;

use crate::domain::entities::Archive;
use crate::error::ConfigurationError;

pub trait ArchiveResolver: Send + Sync {
    /// Resolve `pattern` against `workspace`.
    ///
    /// An empty result is not an error here; the orchestrator decides what an
    /// empty match means.
    fn resolve(&self, workspace: &Path, pattern: &str) -> Result<Vec<Archive>, ConfigurationError>;
}
