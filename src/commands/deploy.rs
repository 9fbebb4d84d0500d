//! `redeploy deploy`

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;

use redeploy::config::EnvOverrides;
use redeploy::domain::ports::DeployEventSink;
use redeploy::domain::value_objects::CancelToken;
use redeploy::infrastructure::{ConsoleEventSink, JsonEventSink, TomlCredentialStore};
use redeploy::{
    AdapterRegistry, DeployOrchestrator, ExecutionContext, HostDefaults, JobContext, JobKind,
    JobStatus, WorkspaceArchiveResolver,
};

use crate::cli::DeployArgs;

pub fn cmd_deploy(args: &DeployArgs, json: bool) -> Result<ExitCode> {
    let registry = AdapterRegistry::builtin();
    let mut step = super::load_step(&args.source, &registry)?;

    // CLI flags win over REDEPLOY_* variables, which win over the definition
    EnvOverrides::from_env().apply(&mut step);
    if let Some(context_path) = &args.context_path {
        step.set_context_path(Some(context_path.clone()));
    }
    if let Some(on_failure) = args.on_failure {
        step.set_on_failure(Some(on_failure));
    }

    let kind = if args.pipeline {
        JobKind::Pipeline
    } else {
        JobKind::Freestyle
    };
    let job = JobContext::new(&args.job_name, kind, &args.workspace)
        .with_envs(std::env::vars())
        .with_envs(args.env.iter().cloned());

    let credentials = TomlCredentialStore::discover(args.credentials.as_deref())?;
    let events: Arc<dyn DeployEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout())
    };

    let cancel = CancelToken::new();
    let handle = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || handle.cancel()) {
        tracing::warn!(error = %err, "cannot install Ctrl-C handler");
    }

    let ctx = ExecutionContext::new(job)
        .with_events(events)
        .with_credentials(Arc::new(credentials))
        .with_cancel_token(cancel);

    let orchestrator = DeployOrchestrator::new(WorkspaceArchiveResolver::new(), HostDefaults);
    let outcome = orchestrator.run(&step, &ctx)?;

    Ok(exit_code(outcome.status()))
}

fn exit_code(status: JobStatus) -> ExitCode {
    match status {
        JobStatus::Success => ExitCode::SUCCESS,
        JobStatus::Failure => ExitCode::from(1),
        JobStatus::Unstable => ExitCode::from(2),
    }
}
