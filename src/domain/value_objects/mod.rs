//! Value Objects
//!
//! Immutable types compared by value.

mod cancel;
mod context_path;
mod credentials;
mod job;
mod job_status;

pub use cancel::CancelToken;
pub use context_path::ContextPath;
pub use credentials::Credentials;
pub use job::{JobContext, JobKind};
pub use job_status::JobStatus;
