//! Container Adapter Port
//!
//! One configured connection to a deployment target (a container instance).
//! Every adapter kind exposes its identity, a target description and its
//! settings. Whether it can actually deploy is answered by [`ContainerAdapter::contract`]:
//! adapters written against an older contract report [`DeployContract::Legacy`]
//! and are never invoked.

use std::collections::BTreeMap;

use crate::domain::entities::Archive;
use crate::domain::ports::ExecutionContext;
use crate::domain::value_objects::ContextPath;
use crate::error::DeploymentError;

/// Configured settings of one adapter, keyed by setting name (`url`, `home`, ...)
pub type AdapterSettings = BTreeMap<String, String>;

/// Which deploy contract an adapter instance satisfies
pub enum DeployContract<'a> {
    /// The adapter implements the current contract
    Modern(&'a dyn Redeploy),
    /// The adapter predates the current contract and cannot deploy
    Legacy,
}

impl DeployContract<'_> {
    pub fn is_legacy(&self) -> bool {
        matches!(self, DeployContract::Legacy)
    }
}

/// A configured deployment target.
///
/// Instances are immutable after construction and shared across runs.
pub trait ContainerAdapter: std::fmt::Debug + Send + Sync {
    /// Stable identity of the adapter kind, unique across the registry
    fn container_id(&self) -> &'static str;

    /// Human readable target description used in logs (URL, home path, ...)
    fn describe(&self) -> String;

    /// Current settings, including values equal to their defaults
    fn settings(&self) -> AdapterSettings;

    /// Capability probe: which deploy contract this instance satisfies
    fn contract(&self) -> DeployContract<'_>;
}

/// The current deploy contract
pub trait Redeploy {
    /// Deploy `archive` under `context_path`, replacing any previous deployment.
    ///
    /// Deploying the same archive to the same context path twice must leave the
    /// container in the same state as deploying it once.
    fn redeploy(
        &self,
        archive: &Archive,
        context_path: &ContextPath,
        ctx: &ExecutionContext,
    ) -> Result<(), DeploymentError>;
}
