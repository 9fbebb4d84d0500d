//! Domain Layer
//!
//! The core of redeploy - the adapter contract and the deploy data model,
//! without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Archive, DeployStep, DeployAttempt
//! - `value_objects/` - ContextPath, JobContext, JobStatus, Credentials
//! - `ports/` - Interface definitions for infrastructure (adapters, resolver, events)

pub mod entities;
pub mod ports;
pub mod value_objects;
