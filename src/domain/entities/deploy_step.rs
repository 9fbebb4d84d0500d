//! DeployStep entity - the persisted configuration of one deploy step
//!
//! Holds the ordered adapter list, the archive glob, and the two optional
//! settings whose defaults depend on the invoking job.

use std::sync::Arc;

use crate::domain::ports::{ContainerAdapter, ContextualDefaults};
use crate::domain::value_objects::JobContext;

/// Configuration of the deploy step for one job definition
#[derive(Debug, Clone)]
pub struct DeployStep {
    adapters: Vec<Arc<dyn ContainerAdapter>>,
    war: String,
    context_path: Option<String>,
    on_failure: Option<bool>,
}

impl DeployStep {
    pub fn new(adapters: Vec<Arc<dyn ContainerAdapter>>, war: impl Into<String>) -> Self {
        Self {
            adapters,
            war: war.into(),
            context_path: None,
            on_failure: None,
        }
    }

    /// Set an explicit context path. Blank values mean "use the default".
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.set_context_path(Some(context_path.into()));
        self
    }

    pub fn with_on_failure(mut self, on_failure: bool) -> Self {
        self.on_failure = Some(on_failure);
        self
    }

    pub fn set_context_path(&mut self, context_path: Option<String>) {
        self.context_path = context_path.filter(|c| !c.trim().is_empty());
    }

    pub fn set_on_failure(&mut self, on_failure: Option<bool>) {
        self.on_failure = on_failure;
    }

    pub fn adapters(&self) -> &[Arc<dyn ContainerAdapter>] {
        &self.adapters
    }

    /// Archive glob, relative to the job workspace
    pub fn war(&self) -> &str {
        &self.war
    }

    /// Explicit context path, if configured
    pub fn context_path(&self) -> Option<&str> {
        self.context_path.as_deref()
    }

    /// Explicit on-failure flag, if configured
    pub fn on_failure(&self) -> Option<bool> {
        self.on_failure
    }

    /// On-failure flag after applying the job's contextual default
    pub fn effective_on_failure(&self, defaults: &dyn ContextualDefaults, job: &JobContext) -> bool {
        self.on_failure
            .unwrap_or_else(|| defaults.default_on_failure(job))
    }

    /// Copy of this step with values equal to their contextual default removed.
    ///
    /// This is the form that gets persisted: explicit values only survive when
    /// they change behaviour for the given job.
    pub fn minimized(&self, defaults: &dyn ContextualDefaults, job: &JobContext) -> Self {
        let mut step = self.clone();
        if step.on_failure == Some(defaults.default_on_failure(job)) {
            step.on_failure = None;
        }
        step
    }
}

impl PartialEq for DeployStep {
    fn eq(&self, other: &Self) -> bool {
        self.war == other.war
            && self.context_path == other.context_path
            && self.on_failure == other.on_failure
            && self.adapters.len() == other.adapters.len()
            && self
                .adapters
                .iter()
                .zip(other.adapters.iter())
                .all(|(a, b)| {
                    a.container_id() == b.container_id() && a.settings() == b.settings()
                })
    }
}
