//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod archive_resolver;
pub mod container_adapter;
pub mod credential_store;
pub mod defaults;
pub mod deploy_events;
pub mod execution;

pub use archive_resolver::ArchiveResolver;
pub use container_adapter::{AdapterSettings, ContainerAdapter, DeployContract, Redeploy};
pub use credential_store::{CredentialStore, NoCredentials};
pub use defaults::ContextualDefaults;
pub use deploy_events::{DeployEvent, DeployEventSink, EventLevel, NoopEventSink};
pub use execution::ExecutionContext;
