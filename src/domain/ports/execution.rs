//! Execution Context
//!
//! Everything an adapter may touch while deploying: the invoking job, the
//! execution log, credential lookup and the cancellation flag.

use std::sync::Arc;

use crate::domain::ports::{CredentialStore, DeployEvent, DeployEventSink, NoCredentials, NoopEventSink};
use crate::domain::value_objects::{CancelToken, Credentials, JobContext};

#[derive(Clone)]
pub struct ExecutionContext {
    job: JobContext,
    events: Arc<dyn DeployEventSink>,
    credentials: Arc<dyn CredentialStore>,
    cancel: CancelToken,
}

impl ExecutionContext {
    /// Silent context with no credentials
    pub fn new(job: JobContext) -> Self {
        Self {
            job,
            events: Arc::new(NoopEventSink),
            credentials: Arc::new(NoCredentials),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn job(&self) -> &JobContext {
        &self.job
    }

    pub fn emit(&self, event: DeployEvent) {
        self.events.on_event(event);
    }

    pub fn credentials(&self, id: &str) -> Option<Credentials> {
        self.credentials.lookup(id)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("job", &self.job)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
