//! Common test utilities for redeploy CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated workspace, container home and config directory
//! - Fixtures: reusable archive contents and job definitions

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
