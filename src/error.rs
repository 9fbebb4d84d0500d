//! Error types for redeploy
//!
//! Uses `thiserror` for library errors. The binary wraps them in `anyhow`.
//!
//! Three failure families exist:
//! - [`ConfigurationError`]: the job is misconfigured; raised before any deploy attempt
//! - [`DeploymentError`]: one adapter failed to push one archive; isolated per attempt
//! - [`LegacyContractError`]: the adapter predates the current deploy contract

use std::path::PathBuf;
use thiserror::Error;

/// Fixed remediation text carried by every [`LegacyContractError`].
pub const MAINTAINER_NOTICE: &str = "Please contact the plugin maintainer";

/// Result type alias for configuration-time operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// The job definition cannot be turned into deploy attempts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required adapter field is missing or blank
    #[error("adapter '{adapter}' requires a non-empty '{field}'")]
    MissingField { adapter: String, field: String },

    /// An adapter field is present but unusable
    #[error("adapter '{adapter}' has an invalid '{field}': {message}")]
    InvalidField {
        adapter: String,
        field: String,
        message: String,
    },

    /// A setting was given that the adapter kind does not declare
    #[error("adapter '{adapter}' does not accept setting '{field}'")]
    UnknownSetting { adapter: String, field: String },

    /// No adapter kind is registered under this name
    #[error("unknown adapter kind '{0}'")]
    UnknownAdapter(String),

    /// Two adapter kinds tried to claim the same identity or step name
    #[error("adapter kind '{0}' is already registered")]
    DuplicateAdapter(String),

    /// The archive glob cannot be compiled
    #[error("invalid archive pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The archive glob matched nothing
    #[error("no artifacts matched '{pattern}' in {workspace}")]
    NoArchives { pattern: String, workspace: PathBuf },

    /// The job workspace does not exist
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(PathBuf),

    /// No default context path can be derived from the archive's file name
    #[error("cannot derive a context path from archive {0}")]
    UnnamedArchive(PathBuf),

    /// A context path was given but is blank
    #[error("context path must not be empty")]
    EmptyContextPath,

    /// A configuration or credentials file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidFile { file: PathBuf, message: String },

    /// The pipeline step text could not be parsed
    #[error("invalid step syntax at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Reading a configuration input failed
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl ConfigurationError {
    pub fn missing(adapter: &str, field: &str) -> Self {
        Self::MissingField {
            adapter: adapter.to_string(),
            field: field.to_string(),
        }
    }

    pub fn invalid(adapter: &str, field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            adapter: adapter.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// One adapter failed to push one archive to its target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("deployment to {target} via '{adapter}' failed: {cause}")]
pub struct DeploymentError {
    /// Identity of the adapter kind (`tomcat8x`, `glassfish3x`, ...)
    pub adapter: String,
    /// Human readable target description (URL or home directory)
    pub target: String,
    /// Underlying cause
    pub cause: String,
}

impl DeploymentError {
    pub fn new(adapter: &str, target: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            adapter: adapter.to_string(),
            target: target.into(),
            cause: cause.into(),
        }
    }
}

/// The adapter does not implement the current deploy contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "adapter '{adapter}' ({target}) was built against an older deploy contract and cannot deploy. \
     Please contact the plugin maintainer for an updated adapter."
)]
pub struct LegacyContractError {
    pub adapter: String,
    pub target: String,
}

/// Umbrella error for one deploy attempt or a whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    #[error(transparent)]
    LegacyContract(#[from] LegacyContractError),
}

impl DeployError {
    /// Returns true if this error came from the legacy compatibility shim
    pub fn is_legacy(&self) -> bool {
        matches!(self, DeployError::LegacyContract(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_field() {
        let err = ConfigurationError::missing("tomcat8x", "url");
        assert_eq!(err.to_string(), "adapter 'tomcat8x' requires a non-empty 'url'");
    }

    #[test]
    fn test_error_display_no_archives() {
        let err = ConfigurationError::NoArchives {
            pattern: "target/*.war".to_string(),
            workspace: PathBuf::from("/ws"),
        };
        assert_eq!(err.to_string(), "no artifacts matched 'target/*.war' in /ws");
    }

    #[test]
    fn test_deployment_error_names_adapter_target_and_cause() {
        let err = DeploymentError::new("tomcat9x", "http://ci:8080", "connection refused");
        let text = err.to_string();
        assert!(text.contains("tomcat9x"));
        assert!(text.contains("http://ci:8080"));
        assert!(text.contains("connection refused"));
    }

    #[test]
    fn test_legacy_error_carries_maintainer_notice() {
        let err = LegacyContractError {
            adapter: "legacy".to_string(),
            target: "legacy container".to_string(),
        };
        assert!(err.to_string().contains(MAINTAINER_NOTICE));
    }

    #[test]
    fn test_deploy_error_is_legacy() {
        let legacy: DeployError = LegacyContractError {
            adapter: "legacy".to_string(),
            target: "x".to_string(),
        }
        .into();
        let remote: DeployError = DeploymentError::new("tomcat7x", "x", "boom").into();
        assert!(legacy.is_legacy());
        assert!(!remote.is_legacy());
    }
}
