use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// redeploy - deploy web archives to Tomcat and GlassFish containers
#[derive(Parser, Debug)]
#[command(name = "redeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a deploy step against the workspace
    Deploy(DeployArgs),

    /// List the registered adapter kinds
    Adapters,

    /// Print the canonical step snippet (or TOML) for a job definition
    Snippet(SnippetArgs),
}

/// Where the deploy step comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct StepSource {
    /// Job definition file (TOML)
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Step snippet, e.g. "deploy adapters: [workflowAdapter()], war: 'target/*.war'"
    #[arg(long)]
    pub step: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub source: StepSource,

    /// Job workspace the archive glob is resolved against
    #[arg(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Name of the invoking job
    #[arg(long, default_value = "redeploy")]
    pub job_name: String,

    /// Run as a pipeline job (failed deployments fail the build by default)
    #[arg(long)]
    pub pipeline: bool,

    /// Override the context path
    #[arg(long)]
    pub context_path: Option<String>,

    /// Override the on-failure policy (true: FAILURE, false: UNSTABLE)
    #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
    pub on_failure: Option<bool>,

    /// Credentials file (defaults to $REDEPLOY_CREDENTIALS or the user config directory)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Extra job environment variable (KEY=VALUE), may be repeated
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct SnippetArgs {
    #[command(flatten)]
    pub source: StepSource,

    /// Render for a pipeline job
    #[arg(long)]
    pub pipeline: bool,

    /// Print the TOML job definition instead of the snippet
    #[arg(long)]
    pub toml: bool,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.trim().is_empty() {
        return Err(format!("empty variable name in '{}'", raw));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
