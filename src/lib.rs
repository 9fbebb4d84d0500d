//! redeploy - deploy built web archives to application containers
//!
//! A deploy step names an archive glob and an ordered list of container
//! adapters (Tomcat manager, local Tomcat, GlassFish, ...). The orchestrator
//! resolves the archives inside the job workspace, pushes every archive to
//! every adapter, isolates failures per attempt and folds the results into a
//! job status according to the step's on-failure policy.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod syntax;

// Re-exports for convenience
pub use application::{DeployOrchestrator, DeployOutcome};
pub use config::{AdapterDefinition, ConfigWarning, JobDefinition};
pub use domain::entities::{Archive, DeployAttempt, DeployStep};
pub use domain::ports::{ContainerAdapter, DeployContract, ExecutionContext, Redeploy};
pub use domain::value_objects::{ContextPath, JobContext, JobKind, JobStatus};
pub use error::{
    ConfigResult, ConfigurationError, DeployError, DeploymentError, LegacyContractError,
    MAINTAINER_NOTICE,
};
pub use infrastructure::{AdapterRegistry, HostDefaults, WorkspaceArchiveResolver};
pub use syntax::{parse_step, render_step};
