//! Adapter Registry
//!
//! Init-time table of every adapter kind: identity, step-syntax symbol,
//! display name, configurable fields in stable order, and a constructor from
//! settings. Configuration loading, the step syntax and `redeploy adapters`
//! all go through this table.

use std::sync::Arc;

use crate::domain::ports::{AdapterSettings, ContainerAdapter};
use crate::error::ConfigurationError;

use super::glassfish::GlassFishVersion;
use super::tomcat::TomcatVersion;
use super::{legacy, pipeline, tomcat_home};

/// Constructor for one adapter kind
pub type AdapterConstructor =
    fn(&AdapterSettings) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError>;

/// One configurable field of an adapter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in settings maps and TOML (`credentials_id`)
    pub key: &'static str,
    /// Name in the step syntax (`credentialsId`)
    pub step_name: &'static str,
    pub required: bool,
    /// Value assumed when the field is omitted
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(key: &'static str, step_name: &'static str) -> Self {
        Self {
            key,
            step_name,
            required: true,
            default: None,
        }
    }

    pub const fn optional(key: &'static str, step_name: &'static str) -> Self {
        Self {
            key,
            step_name,
            required: false,
            default: None,
        }
    }

    pub const fn with_default(
        key: &'static str,
        step_name: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            key,
            step_name,
            required: false,
            default: Some(default),
        }
    }

    /// Whether `value` is worth persisting for this field
    pub fn is_explicit(&self, value: &str) -> bool {
        let value = value.trim();
        !value.is_empty() && self.default != Some(value)
    }
}

/// Registration entry for one adapter kind
#[derive(Debug, Clone)]
pub struct AdapterDescriptor {
    /// Stable identity (`tomcat8x`), also used in TOML job definitions
    pub id: &'static str,
    /// Step-syntax symbol (`tomcat8`)
    pub symbol: &'static str,
    pub display_name: &'static str,
    pub fields: &'static [FieldSpec],
    pub constructor: AdapterConstructor,
}

impl AdapterDescriptor {
    /// Construct an adapter, rejecting settings the kind does not declare
    pub fn build(&self, settings: &AdapterSettings) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
        if let Some(unknown) = settings.keys().find(|k| self.field(k).is_none()) {
            return Err(ConfigurationError::UnknownSetting {
                adapter: self.id.to_string(),
                field: unknown.clone(),
            });
        }
        (self.constructor)(settings)
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_by_step_name(&self, step_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.step_name == step_name)
    }

    /// Settings of `adapter` that differ from their defaults, in field order
    pub fn explicit_settings(&self, adapter: &dyn ContainerAdapter) -> Vec<(&'static FieldSpec, String)> {
        let settings = adapter.settings();
        self.fields
            .iter()
            .filter_map(|field| {
                settings
                    .get(field.key)
                    .filter(|value| field.is_explicit(value))
                    .map(|value| (field, value.clone()))
            })
            .collect()
    }
}

/// Table of registered adapter kinds, in registration order
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    descriptors: Vec<AdapterDescriptor>,
}

impl AdapterRegistry {
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Registry with every built-in adapter kind
    pub fn builtin() -> Self {
        let mut descriptors: Vec<AdapterDescriptor> = TomcatVersion::ALL
            .iter()
            .map(|v| v.descriptor())
            .collect();
        descriptors.push(tomcat_home::descriptor());
        descriptors.extend(GlassFishVersion::ALL.iter().map(|v| v.descriptor()));
        descriptors.push(pipeline::descriptor());
        descriptors.push(legacy::descriptor());
        Self { descriptors }
    }

    /// Add an adapter kind. Identities and symbols must stay unique.
    pub fn register(&mut self, descriptor: AdapterDescriptor) -> Result<(), ConfigurationError> {
        if let Some(existing) = self
            .descriptors
            .iter()
            .find(|d| d.id == descriptor.id || d.symbol == descriptor.symbol)
        {
            let clash = if existing.id == descriptor.id {
                descriptor.id
            } else {
                descriptor.symbol
            };
            return Err(ConfigurationError::DuplicateAdapter(clash.to_string()));
        }
        tracing::debug!(id = descriptor.id, symbol = descriptor.symbol, "adapter kind registered");
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// `(identity, display name)` of every registered kind
    pub fn list_available_kinds(&self) -> Vec<(&'static str, &'static str)> {
        self.descriptors
            .iter()
            .map(|d| (d.id, d.display_name))
            .collect()
    }

    pub fn descriptors(&self) -> &[AdapterDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, id: &str) -> Option<&AdapterDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&AdapterDescriptor> {
        self.descriptors.iter().find(|d| d.symbol == symbol)
    }

    /// Construct an adapter of kind `id`
    pub fn build(
        &self,
        id: &str,
        settings: &AdapterSettings,
    ) -> Result<Arc<dyn ContainerAdapter>, ConfigurationError> {
        self.get(id)
            .ok_or_else(|| ConfigurationError::UnknownAdapter(id.to_string()))?
            .build(settings)
    }

    /// Descriptor matching a configured adapter instance
    pub fn descriptor_for(
        &self,
        adapter: &dyn ContainerAdapter,
    ) -> Result<&AdapterDescriptor, ConfigurationError> {
        self.get(adapter.container_id())
            .ok_or_else(|| ConfigurationError::UnknownAdapter(adapter.container_id().to_string()))
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
