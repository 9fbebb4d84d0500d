//! Legacy Adapter
//!
//! Stands in for adapter configurations written against the pre-redeploy
//! contract. It can still be configured, listed and serialized, but it never
//! offers the redeploy capability, so every attempt through it fails.

use std::sync::Arc;

use crate::domain::ports::{AdapterSettings, ContainerAdapter, DeployContract};
use crate::error::ConfigurationError;

use super::registry::AdapterDescriptor;

const ID: &str = "legacy";

pub(crate) fn descriptor() -> AdapterDescriptor {
    AdapterDescriptor {
        id: ID,
        symbol: "legacyAdapter",
        display_name: "Legacy adapter (unsupported)",
        fields: &[],
        constructor: build,
    }
}

fn build(_settings: &AdapterSettings) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
    Ok(Arc::new(LegacyAdapter))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LegacyAdapter;

impl ContainerAdapter for LegacyAdapter {
    fn container_id(&self) -> &'static str {
        ID
    }

    fn describe(&self) -> String {
        "legacy container".to_string()
    }

    fn settings(&self) -> AdapterSettings {
        AdapterSettings::new()
    }

    fn contract(&self) -> DeployContract<'_> {
        DeployContract::Legacy
    }
}
