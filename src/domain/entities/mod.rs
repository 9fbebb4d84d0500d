//! Domain Entities
//!
//! - `Archive` - a resolved deployable package
//! - `DeployStep` - the configured deploy step (adapters, glob, policy)
//! - `DeployAttempt` - the recorded outcome of one (archive, adapter) pair

mod archive;
mod attempt;
mod deploy_step;

pub use archive::Archive;
pub use attempt::{AttemptStatus, DeployAttempt};
pub use deploy_step::DeployStep;
