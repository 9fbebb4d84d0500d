//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployOrchestrator` - resolves archives and drives every configured adapter

pub mod deploy;

pub use deploy::{DeployOrchestrator, DeployOutcome};
