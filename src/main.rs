//! redeploy CLI - deploy web archives to application containers
//!
//! Usage: redeploy <COMMAND>
//!
//! Commands:
//!   deploy    Run a deploy step against the workspace
//!   adapters  List the registered adapter kinds
//!   snippet   Print the canonical step snippet for a job definition
//!
//! Exit codes: 0 success, 1 failure, 2 unstable, 3 configuration error.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Exit code for errors raised before any deploy attempt
const EXIT_CONFIGURATION: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Deploy(args) => commands::deploy::cmd_deploy(args, cli.json),
        Commands::Adapters => commands::adapters::cmd_adapters(cli.json),
        Commands::Snippet(args) => commands::snippet::cmd_snippet(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "event": "error", "level": "ERROR", "message": format!("{:#}", err) })
                );
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(EXIT_CONFIGURATION)
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("redeploy={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
