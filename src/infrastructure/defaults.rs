//! Contextual defaults for jobs run by this host

use crate::domain::entities::Archive;
use crate::domain::ports::ContextualDefaults;
use crate::domain::value_objects::{ContextPath, JobContext};
use crate::error::ConfigurationError;

/// Pipelines fail the build on a failed deployment, classic jobs mark it
/// unstable. The context path defaults to the archive base name.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDefaults;

impl ContextualDefaults for HostDefaults {
    fn default_on_failure(&self, job: &JobContext) -> bool {
        job.kind().is_pipeline()
    }

    fn default_context_path(
        &self,
        _job: &JobContext,
        archive: &Archive,
    ) -> Result<ContextPath, ConfigurationError> {
        ContextPath::for_archive(archive)
    }
}
