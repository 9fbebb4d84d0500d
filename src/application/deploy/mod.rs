//! Deploy Module
//!
//! Orchestrates deploy runs for redeploy.
//!
//! ## Structure
//!
//! - `outcome` - Result types (`DeployOutcome`)
//! - `use_case` - Core orchestration (`DeployOrchestrator`)
//!
//! ## Usage
//!
//! ```ignore
//! use redeploy::application::deploy::DeployOrchestrator;
//!
//! let orchestrator = DeployOrchestrator::new(resolver, defaults);
//! let outcome = orchestrator.run(&step, &ctx)?;
//! println!("{}", outcome.status());
//! ```

mod outcome;
mod use_case;

pub use outcome::DeployOutcome;
pub use use_case::DeployOrchestrator;
