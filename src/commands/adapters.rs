//! `redeploy adapters`

use std::process::ExitCode;

use anyhow::Result;

use redeploy::infrastructure::adapters::{AdapterDescriptor, FieldSpec};
use redeploy::AdapterRegistry;

pub fn cmd_adapters(json: bool) -> Result<ExitCode> {
    let registry = AdapterRegistry::builtin();

    if json {
        let kinds: Vec<_> = registry.descriptors().iter().map(descriptor_json).collect();
        println!("{}", serde_json::json!({ "adapters": kinds }));
        return Ok(ExitCode::SUCCESS);
    }

    let width = registry
        .descriptors()
        .iter()
        .map(|d| d.id.len())
        .max()
        .unwrap_or(0);
    for descriptor in registry.descriptors() {
        println!(
            "{:<width$}  {} ({}){}",
            descriptor.id,
            descriptor.display_name,
            descriptor.symbol,
            render_fields(descriptor.fields),
            width = width
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn descriptor_json(descriptor: &AdapterDescriptor) -> serde_json::Value {
    let fields: Vec<_> = descriptor
        .fields
        .iter()
        .map(|f| {
            serde_json::json!({
                "key": f.key,
                "step_name": f.step_name,
                "required": f.required,
                "default": f.default,
            })
        })
        .collect();
    serde_json::json!({
        "id": descriptor.id,
        "symbol": descriptor.symbol,
        "display_name": descriptor.display_name,
        "fields": fields,
    })
}

/// `: url*, manager_context=/manager/text` (`*` marks required fields)
fn render_fields(fields: &[FieldSpec]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = fields
        .iter()
        .map(|f| match (f.required, f.default) {
            (true, _) => format!("{}*", f.key),
            (false, Some(default)) => format!("{}={}", f.key, default),
            (false, None) => f.key.to_string(),
        })
        .collect();
    format!(": {}", rendered.join(", "))
}
