//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `adapters/` - Container adapters (Tomcat, GlassFish, ...) and their registry
//! - `archives` - Workspace glob resolution
//! - `credentials` - TOML credential store
//! - `defaults` - Contextual defaults for this host
//! - `events/` - Console and NDJSON event sinks

pub mod adapters;
pub mod archives;
pub mod credentials;
pub mod defaults;
pub mod events;

// Re-export for convenience
pub use adapters::{AdapterDescriptor, AdapterRegistry, FieldSpec};
pub use archives::WorkspaceArchiveResolver;
pub use credentials::TomlCredentialStore;
pub use defaults::HostDefaults;
pub use events::{ConsoleEventSink, JsonEventSink};
