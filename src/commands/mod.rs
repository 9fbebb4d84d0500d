//! Command implementations for the redeploy binary

pub mod adapters;
pub mod deploy;
pub mod snippet;

use anyhow::{Context, Result};

use redeploy::config::{self, ConfigWarning};
use redeploy::{AdapterRegistry, DeployStep};

use crate::cli::StepSource;

/// Load the deploy step from a job file or a snippet.
///
/// Unknown keys in job files are reported as warnings and otherwise ignored.
pub(crate) fn load_step(source: &StepSource, registry: &AdapterRegistry) -> Result<DeployStep> {
    if let Some(path) = &source.job {
        let (definition, warnings) = config::load_with_warnings(path)
            .with_context(|| format!("cannot load job definition {}", path.display()))?;
        report_warnings(&warnings);
        return Ok(definition.into_step(registry)?);
    }

    let snippet = source.step.as_deref().unwrap_or_default();
    Ok(redeploy::parse_step(snippet, registry)?)
}

fn report_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}
