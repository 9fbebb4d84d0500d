//! Pipeline Adapter
//!
//! Logs the deployment it would perform and succeeds. Pipelines use it to
//! dry-run a deploy step.

use std::sync::Arc;

use crate::domain::entities::Archive;
use crate::domain::ports::{
    AdapterSettings, ContainerAdapter, DeployContract, DeployEvent, ExecutionContext, Redeploy,
};
use crate::domain::value_objects::ContextPath;
use crate::error::{ConfigurationError, DeploymentError};

use super::registry::AdapterDescriptor;

const ID: &str = "pipeline";

pub(crate) fn descriptor() -> AdapterDescriptor {
    AdapterDescriptor {
        id: ID,
        symbol: "workflowAdapter",
        display_name: "Pipeline (no-op)",
        fields: &[],
        constructor: build,
    }
}

fn build(_settings: &AdapterSettings) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
    Ok(Arc::new(PipelineAdapter))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineAdapter;

impl ContainerAdapter for PipelineAdapter {
    fn container_id(&self) -> &'static str {
        ID
    }

    fn describe(&self) -> String {
        "pipeline (no-op)".to_string()
    }

    fn settings(&self) -> AdapterSettings {
        AdapterSettings::new()
    }

    fn contract(&self) -> DeployContract<'_> {
        DeployContract::Modern(self)
    }
}

impl Redeploy for PipelineAdapter {
    fn redeploy(
        &self,
        archive: &Archive,
        context_path: &ContextPath,
        ctx: &ExecutionContext,
    ) -> Result<(), DeploymentError> {
        ctx.emit(DeployEvent::AdapterMessage {
            adapter: ID.to_string(),
            message: format!(
                "Would deploy {} to {} (job '{}')",
                archive.file_name(),
                context_path,
                ctx.job().name()
            ),
        });
        Ok(())
    }
}
