//! Job definition types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::DeployStep;
use crate::domain::ports::{AdapterSettings, ContextualDefaults};
use crate::domain::value_objects::JobContext;
use crate::error::{ConfigResult, ConfigurationError};
use crate::infrastructure::adapters::AdapterRegistry;

/// Persisted form of one deploy step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobDefinition {
    /// Archive glob, relative to the workspace
    pub war: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_path: Option<String>,

    /// Omitted when equal to the job's contextual default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<bool>,

    /// Adapters in deployment order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adapters: Vec<AdapterDefinition>,
}

/// One `[[adapters]]` entry: a kind plus its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterDefinition {
    pub kind: String,

    #[serde(flatten)]
    pub settings: BTreeMap<String, toml::Value>,
}

impl AdapterDefinition {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            settings: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Settings as adapter constructors expect them.
    ///
    /// Scalars are accepted in any TOML type (`admin_port = 4848` and
    /// `admin_port = "4848"` are the same); arrays and tables are rejected.
    pub fn adapter_settings(&self) -> ConfigResult<AdapterSettings> {
        self.settings
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => {
                        return Err(ConfigurationError::invalid(
                            &self.kind,
                            key,
                            format!("expected a scalar, found {}", other.type_str()),
                        ))
                    }
                };
                Ok((key.clone(), text))
            })
            .collect()
    }
}

impl JobDefinition {
    /// Build the deploy step, constructing every adapter through `registry`
    pub fn into_step(&self, registry: &AdapterRegistry) -> ConfigResult<DeployStep> {
        let adapters = self
            .adapters
            .iter()
            .map(|def| registry.build(&def.kind, &def.adapter_settings()?))
            .collect::<ConfigResult<Vec<_>>>()?;

        let mut step = DeployStep::new(adapters, self.war.clone());
        step.set_context_path(self.context_path.clone());
        step.set_on_failure(self.on_failure);
        Ok(step)
    }

    /// Persisted form of `step` for `job`, without values equal to their defaults
    pub fn from_step(
        step: &DeployStep,
        registry: &AdapterRegistry,
        defaults: &dyn ContextualDefaults,
        job: &JobContext,
    ) -> ConfigResult<Self> {
        let step = step.minimized(defaults, job);
        let adapters = step
            .adapters()
            .iter()
            .map(|adapter| -> ConfigResult<AdapterDefinition> {
                let descriptor = registry.descriptor_for(adapter.as_ref())?;
                let settings = descriptor
                    .explicit_settings(adapter.as_ref())
                    .into_iter()
                    .map(|(field, value)| (field.key.to_string(), toml::Value::String(value)))
                    .collect();
                Ok(AdapterDefinition {
                    kind: descriptor.id.to_string(),
                    settings,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            war: step.war().to_string(),
            context_path: step.context_path().map(str::to_string),
            on_failure: step.on_failure(),
            adapters,
        })
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::InvalidFile {
            file: "<job definition>".into(),
            message: e.to_string(),
        })
    }
}
