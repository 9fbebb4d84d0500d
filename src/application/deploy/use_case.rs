//! Deploy Orchestrator
//!
//! Turns a configured deploy step into deploy attempts:
//! 1. Short-circuit when no adapters are configured
//! 2. Resolve the archive glob inside the job workspace
//! 3. Work out the context path per archive
//! 4. Attempt every (archive, adapter) pair in order, isolating failures
//! 5. Fold the attempts into one job status
//!
//! Attempts run strictly sequentially. Timeouts and retries are the adapters'
//! business.

use std::time::Instant;

use crate::domain::entities::{Archive, AttemptStatus, DeployAttempt, DeployStep};
use crate::domain::ports::{
    ArchiveResolver, ContainerAdapter, ContextualDefaults, DeployContract, DeployEvent,
    ExecutionContext,
};
use crate::domain::value_objects::{ContextPath, JobContext};
use crate::error::{ConfigurationError, DeployError, LegacyContractError};

use super::outcome::DeployOutcome;

/// Deploy orchestrator - runs one deploy step for one job execution
///
/// Parameterized by its ports so tests can swap the archive resolver and the
/// defaults strategy.
pub struct DeployOrchestrator<R, D>
where
    R: ArchiveResolver,
    D: ContextualDefaults,
{
    resolver: R,
    defaults: D,
}

impl<R, D> DeployOrchestrator<R, D>
where
    R: ArchiveResolver,
    D: ContextualDefaults,
{
    pub fn new(resolver: R, defaults: D) -> Self {
        Self { resolver, defaults }
    }

    /// Run the deploy step.
    ///
    /// Configuration errors abort before any attempt. Deploy failures never
    /// abort: they are recorded in the outcome and folded into its status.
    pub fn run(
        &self,
        step: &DeployStep,
        ctx: &ExecutionContext,
    ) -> Result<DeployOutcome, ConfigurationError> {
        let job = ctx.job();
        let on_failure = step.effective_on_failure(&self.defaults, job);
        let span = tracing::info_span!(
            "deploy",
            job = job.name(),
            kind = %job.kind(),
            adapters = step.adapters().len(),
            on_failure
        );
        let _guard = span.enter();

        let mut outcome = DeployOutcome::new(on_failure);

        // An empty adapter list is a documented no-op, even for pipelines
        if step.adapters().is_empty() {
            tracing::debug!("no adapters configured; archive resolution skipped");
            ctx.emit(DeployEvent::NoAdapters);
            self.complete(&outcome, ctx);
            return Ok(outcome);
        }

        let explicit_context = self.explicit_context_path(step, job)?;
        let pattern = job.expand(step.war());
        let archives = self.resolve_archives(job, &pattern)?;
        outcome.archive_count = archives.len();

        // Every archive needs a mount point before the first attempt runs
        let targets = archives
            .iter()
            .map(|archive| {
                let context_path = match &explicit_context {
                    Some(context_path) => context_path.clone(),
                    None => self.defaults.default_context_path(job, archive)?,
                };
                Ok((archive, context_path))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        ctx.emit(DeployEvent::ArchivesResolved {
            pattern: pattern.clone(),
            count: archives.len(),
            adapter_count: step.adapters().len(),
        });
        for archive in &archives {
            ctx.emit(DeployEvent::ArchiveFound {
                path: archive.path().to_path_buf(),
                size: archive.size(),
                checksum: archive.checksum().ok(),
            });
        }

        let total = archives.len() * step.adapters().len();

        'archives: for (archive, context_path) in targets {
            for adapter in step.adapters() {
                if ctx.is_cancelled() {
                    let remaining = total - outcome.attempts.len();
                    tracing::warn!(remaining, "deploy cancelled");
                    ctx.emit(DeployEvent::Cancelled { remaining });
                    outcome.mark_cancelled(remaining);
                    break 'archives;
                }

                let attempt = self.attempt(adapter.as_ref(), archive, &context_path, ctx);
                outcome.record(attempt);
            }
        }

        self.complete(&outcome, ctx);
        Ok(outcome)
    }

    fn explicit_context_path(
        &self,
        step: &DeployStep,
        job: &JobContext,
    ) -> Result<Option<ContextPath>, ConfigurationError> {
        step.context_path()
            .map(|raw| job.expand(raw))
            .filter(|expanded| !expanded.trim().is_empty())
            .map(|expanded| ContextPath::new(&expanded))
            .transpose()
    }

    fn resolve_archives(
        &self,
        job: &JobContext,
        pattern: &str,
    ) -> Result<Vec<Archive>, ConfigurationError> {
        let workspace = job.workspace();
        if !workspace.is_dir() {
            return Err(ConfigurationError::WorkspaceNotFound(workspace.to_path_buf()));
        }

        let archives = self.resolver.resolve(workspace, pattern)?;
        if archives.is_empty() {
            return Err(ConfigurationError::NoArchives {
                pattern: pattern.to_string(),
                workspace: workspace.to_path_buf(),
            });
        }

        tracing::debug!(pattern, count = archives.len(), "archives resolved");
        Ok(archives)
    }

    /// One (archive, adapter) attempt. Never fails: errors become the attempt status.
    fn attempt(
        &self,
        adapter: &dyn ContainerAdapter,
        archive: &Archive,
        context_path: &ContextPath,
        ctx: &ExecutionContext,
    ) -> DeployAttempt {
        let adapter_id = adapter.container_id();
        let target = adapter.describe();

        ctx.emit(DeployEvent::AttemptStarted {
            archive: archive.path().to_path_buf(),
            adapter: adapter_id.to_string(),
            target: target.clone(),
            context_path: context_path.manager_path(),
        });

        let started = Instant::now();
        let result: Result<(), DeployError> = match adapter.contract() {
            DeployContract::Modern(deployer) => deployer
                .redeploy(archive, context_path, ctx)
                .map_err(DeployError::from),
            DeployContract::Legacy => Err(LegacyContractError {
                adapter: adapter_id.to_string(),
                target: target.clone(),
            }
            .into()),
        };
        let elapsed = started.elapsed();

        let status = match result {
            Ok(()) => {
                tracing::info!(adapter = adapter_id, %target, ?elapsed, "deployed");
                ctx.emit(DeployEvent::AttemptSucceeded {
                    archive: archive.path().to_path_buf(),
                    adapter: adapter_id.to_string(),
                    target: target.clone(),
                    elapsed_ms: elapsed.as_millis(),
                });
                AttemptStatus::Deployed
            }
            Err(err) => {
                tracing::warn!(adapter = adapter_id, %target, error = %err, "deploy attempt failed");
                ctx.emit(DeployEvent::AttemptFailed {
                    archive: archive.path().to_path_buf(),
                    adapter: adapter_id.to_string(),
                    target: target.clone(),
                    cause: err.to_string(),
                    legacy: err.is_legacy(),
                });
                AttemptStatus::Failed(err)
            }
        };

        DeployAttempt {
            archive: archive.path().to_path_buf(),
            adapter: adapter_id.to_string(),
            target,
            context_path: context_path.manager_path(),
            status,
            elapsed,
        }
    }

    fn complete(&self, outcome: &DeployOutcome, ctx: &ExecutionContext) {
        let status = outcome.status();
        tracing::info!(%status, attempts = outcome.attempts.len(), "deploy finished");
        ctx.emit(DeployEvent::Completed {
            status,
            deployed: outcome.deployed_count(),
            failed: outcome.failed_count(),
            skipped: outcome.skipped,
        });
    }
}
