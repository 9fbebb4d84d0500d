//! Infrastructure Adapters
//!
//! These adapters implement the ContainerAdapter port from the domain layer.
//! Each one knows how to push an archive into one kind of container.

pub mod glassfish;
pub mod legacy;
pub mod pipeline;
pub mod registry;
pub(crate) mod settings;
pub mod tomcat;
pub mod tomcat_home;
pub mod transport;

pub use glassfish::{CommandOutput, CommandRunner, GlassFishAdapter, GlassFishVersion, ProcessRunner};
pub use legacy::LegacyAdapter;
pub use pipeline::PipelineAdapter;
pub use registry::{AdapterDescriptor, AdapterRegistry, FieldSpec};
pub use tomcat::{TomcatManagerAdapter, TomcatVersion};
pub use tomcat_home::TomcatHomeAdapter;
pub use transport::{HttpManagerTransport, ManagerRequest, ManagerTransport};
