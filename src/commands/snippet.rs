//! `redeploy snippet`

use std::process::ExitCode;

use anyhow::Result;

use redeploy::{render_step, AdapterRegistry, HostDefaults, JobContext, JobDefinition, JobKind};

use crate::cli::SnippetArgs;

pub fn cmd_snippet(args: &SnippetArgs) -> Result<ExitCode> {
    let registry = AdapterRegistry::builtin();
    let step = super::load_step(&args.source, &registry)?;

    let kind = if args.pipeline {
        JobKind::Pipeline
    } else {
        JobKind::Freestyle
    };
    let job = JobContext::new("snippet", kind, ".");

    if args.toml {
        let definition = JobDefinition::from_step(&step, &registry, &HostDefaults, &job)?;
        print!("{}", definition.to_toml_string()?);
    } else {
        println!("{}", render_step(&step, &registry, &HostDefaults, &job)?);
    }
    Ok(ExitCode::SUCCESS)
}
