//! Job definition files
//!
//! A deploy step is persisted as TOML. Values are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (REDEPLOY_*)
//! 3. The job definition file
//! 4. Contextual defaults of the invoking job (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_with_warnings, parse_bool, parse_with_warnings, ConfigWarning, EnvOverrides,
    CONTEXT_PATH_ENV, ON_FAILURE_ENV,
};
pub use types::{AdapterDefinition, JobDefinition};
