//! Conversion between snippets and [`DeployStep`]

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::DeployStep;
use crate::domain::ports::{AdapterSettings, ContainerAdapter, ContextualDefaults};
use crate::domain::value_objects::JobContext;
use crate::error::{ConfigResult, ConfigurationError};
use crate::infrastructure::adapters::AdapterRegistry;

use super::lexer::syntax_error;
use super::parser::{parse_script, Call, Name, Value};

/// Name of the step in snippets
pub const STEP_NAME: &str = "deploy";

const PARAMETERS: &[&str] = &["adapters", "contextPath", "onFailure", "war"];

/// Parse a deploy snippet into a step, constructing adapters through `registry`.
pub fn parse_step(input: &str, registry: &AdapterRegistry) -> ConfigResult<DeployStep> {
    let script = parse_script(input)?;

    let mut variables: HashMap<&str, &Call> = HashMap::new();
    for (name, call) in &script.bindings {
        variables.insert(name.text.as_str(), call);
    }

    let step = &script.step;
    if step.name.text != STEP_NAME {
        return Err(at(
            &step.name,
            format!("expected '{}', found '{}'", STEP_NAME, step.name.text),
        ));
    }

    let mut adapters = Vec::new();
    let mut war = None;
    let mut context_path = None;
    let mut on_failure = None;
    let mut seen: Vec<&str> = Vec::new();

    for (key, value) in &step.args {
        if seen.contains(&key.text.as_str()) {
            return Err(at(key, format!("parameter '{}' given twice", key.text)));
        }
        seen.push(&key.text);

        match key.text.as_str() {
            "adapters" => {
                let Value::List(items) = value else {
                    return Err(at(key, "'adapters' must be a list"));
                };
                for item in items {
                    let call = match item {
                        Value::Call(call) => call,
                        Value::Var(name) => variables
                            .get(name.text.as_str())
                            .copied()
                            .ok_or_else(|| at(name, format!("undefined variable '{}'", name.text)))?,
                        _ => return Err(at(key, "'adapters' may only contain adapter calls")),
                    };
                    adapters.push(build_adapter(call, registry)?);
                }
            }
            "war" => war = Some(string_param(key, value)?),
            "contextPath" => context_path = Some(string_param(key, value)?),
            "onFailure" => match value {
                Value::Bool(flag) => on_failure = Some(*flag),
                _ => return Err(at(key, "'onFailure' must be true or false")),
            },
            other => {
                return Err(at(
                    key,
                    format!(
                        "unknown parameter '{}' (expected one of {})",
                        other,
                        PARAMETERS.join(", ")
                    ),
                ))
            }
        }
    }

    let war = war.ok_or_else(|| at(&step.name, "missing required parameter 'war'"))?;
    let mut parsed = DeployStep::new(adapters, war);
    parsed.set_context_path(context_path);
    parsed.set_on_failure(on_failure);
    Ok(parsed)
}

fn at(name: &Name, message: impl Into<String>) -> ConfigurationError {
    syntax_error(name.line, name.column, message)
}

fn string_param(key: &Name, value: &Value) -> ConfigResult<String> {
    match value {
        Value::Str(text) => Ok(text.clone()),
        _ => Err(at(key, format!("'{}' must be a string", key.text))),
    }
}

fn build_adapter(call: &Call, registry: &AdapterRegistry) -> ConfigResult<Arc<dyn ContainerAdapter>> {
    let descriptor = registry
        .by_symbol(&call.name.text)
        .ok_or_else(|| ConfigurationError::UnknownAdapter(call.name.text.clone()))?;

    let mut settings = AdapterSettings::new();
    for (key, value) in &call.args {
        let field = descriptor
            .field_by_step_name(&key.text)
            .ok_or_else(|| ConfigurationError::UnknownSetting {
                adapter: descriptor.id.to_string(),
                field: key.text.clone(),
            })?;
        let text = match value {
            Value::Str(text) => text.clone(),
            Value::Int(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => return Err(at(key, format!("'{}' must be a scalar", key.text))),
        };
        if settings.insert(field.key.to_string(), text).is_some() {
            return Err(at(key, format!("argument '{}' given twice", key.text)));
        }
    }

    descriptor.build(&settings)
}

/// Render `step` as the canonical snippet for `job`.
///
/// Parameters and adapter arguments appear in alphabetical order. Values
/// equal to their default for this job are left out.
pub fn render_step(
    step: &DeployStep,
    registry: &AdapterRegistry,
    defaults: &dyn ContextualDefaults,
    job: &JobContext,
) -> ConfigResult<String> {
    let step = step.minimized(defaults, job);

    let adapters = step
        .adapters()
        .iter()
        .map(|adapter| render_adapter(adapter.as_ref(), registry))
        .collect::<ConfigResult<Vec<_>>>()?;

    let mut params = vec![format!("adapters: [{}]", adapters.join(", "))];
    if let Some(context_path) = step.context_path() {
        params.push(format!("contextPath: {}", quote(context_path)));
    }
    if let Some(on_failure) = step.on_failure() {
        params.push(format!("onFailure: {}", on_failure));
    }
    params.push(format!("war: {}", quote(step.war())));

    Ok(format!("{} {}", STEP_NAME, params.join(", ")))
}

fn render_adapter(adapter: &dyn ContainerAdapter, registry: &AdapterRegistry) -> ConfigResult<String> {
    let descriptor = registry.descriptor_for(adapter)?;
    let mut args: Vec<(&str, String)> = descriptor
        .explicit_settings(adapter)
        .into_iter()
        .map(|(field, value)| (field.step_name, value))
        .collect();
    args.sort_by(|a, b| a.0.cmp(b.0));

    let args: Vec<String> = args
        .into_iter()
        .map(|(name, value)| format!("{}: {}", name, quote(&value)))
        .collect();
    Ok(format!("{}({})", descriptor.symbol, args.join(", ")))
}

/// Single-quoted string literal
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
