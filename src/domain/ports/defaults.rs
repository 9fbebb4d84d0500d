//! Contextual Defaults Port
//!
//! The same logical option can default differently depending on who invokes
//! the deploy step. The strategy is passed in explicitly instead of being
//! looked up globally.

use crate::domain::entities::Archive;
use crate::domain::value_objects::{ContextPath, JobContext};
use crate::error::ConfigurationError;

pub trait ContextualDefaults: Send + Sync {
    /// On-failure policy when the step does not set one
    fn default_on_failure(&self, job: &JobContext) -> bool;

    /// Context path when the step does not set one. Must be deterministic.
    fn default_context_path(
        &self,
        job: &JobContext,
        archive: &Archive,
    ) -> Result<ContextPath, ConfigurationError>;
}
