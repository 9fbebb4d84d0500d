//! Test environment builder for isolated redeploy runs.
//!
//! `TestEnv` owns a job workspace, a fake local Tomcat home and a fake user
//! home, and runs the redeploy binary against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Variables that would leak the developer's setup into a test run
const ISOLATED_VARS: &[&str] = &[
    "REDEPLOY_CREDENTIALS",
    "REDEPLOY_CONTEXT_PATH",
    "REDEPLOY_ON_FAILURE",
    "REDEPLOY_HTTP_TIMEOUT_SECS",
    "RUST_LOG",
];

/// Result of running the redeploy binary
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("invalid NDJSON line {:?}: {}", l, e))
            })
            .collect()
    }

    /// Names of the emitted events, in order
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| e["event"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

pub struct TestEnv {
    /// Job workspace the archive glob is resolved against
    pub workspace: TempDir,
    /// Local Tomcat home with an empty `webapps` directory
    pub tomcat_home: TempDir,
    /// Temporary directory for HOME and XDG_CONFIG_HOME
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tomcat_home = tempfile::tempdir().expect("tomcat home");
        fs::create_dir(tomcat_home.path().join("webapps")).expect("webapps");
        Self {
            workspace: tempfile::tempdir().expect("workspace"),
            tomcat_home,
            home_dir: tempfile::tempdir().expect("home"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_redeploy")),
        }
    }

    pub fn workspace_path(&self, relative: &str) -> PathBuf {
        self.workspace.path().join(relative)
    }

    pub fn webapps(&self) -> PathBuf {
        self.tomcat_home.path().join("webapps")
    }

    /// Write a file into the workspace, creating parent directories
    pub fn write_workspace_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.workspace_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, content).expect("write workspace file");
        path
    }

    /// Run redeploy from the workspace
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.workspace.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1");
        for key in ISOLATED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute redeploy");
        Self::output_to_result(output)
    }

    /// Run `redeploy deploy --workspace <ws> --step <snippet> <extra>`
    pub fn deploy_step(&self, snippet: &str, extra: &[&str]) -> TestResult {
        let workspace = path_str(self.workspace.path());
        let mut args = vec!["deploy", "--workspace", workspace.as_str(), "--step", snippet];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Quote a path for use inside a single-quoted snippet string
pub fn snippet_path(path: &Path) -> String {
    path_str(path).replace('\\', "\\\\").replace('\'', "\\'")
}
