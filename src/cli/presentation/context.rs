//! Context command presentation: create, ls, inspect text/json.

use crate::context::{
    ContextCreateResult, ContextInspectResult, ContextListResult, ContextRecord, EndpointData,
};
use comfy_table::{presets, Table};
use serde_json::json;

/// Created context name, printed on stdout so scripts can capture it.
pub fn format_context_create_result(result: &ContextCreateResult) -> String {
    result.record.name.clone()
}

pub fn format_context_list_result_text(result: &ContextListResult) -> String {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec!["NAME", "TYPE", "DESCRIPTION", "ENDPOINT", "CREATED"]);
    for name in &result.reserved {
        table.add_row(vec![name.as_str(), "builtin", "Built-in context", "", ""]);
    }
    for record in &result.contexts {
        table.add_row(vec![
            record.name.clone(),
            record.context_type.to_string(),
            record.description.clone(),
            record.endpoint.summary(),
            record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_context_list_result_json(result: &ContextListResult) -> String {
    let contexts: Vec<_> = result.contexts.iter().map(record_json).collect();
    let out = json!({
        "contexts": contexts,
        "builtin": result.reserved,
        "total": result.contexts.len(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_context_inspect_result_text(result: &ContextInspectResult) -> String {
    let record = &result.record;
    let mut output = format!("Name: {}\n", record.name);
    output.push_str(&format!("Type: {}\n", record.context_type));
    if !record.description.is_empty() {
        output.push_str(&format!("Description: {}\n", record.description));
    }
    output.push_str(&format!("Created: {}\n", record.created_at.to_rfc3339()));
    match &record.endpoint {
        EndpointData::Kubernetes(kube) => {
            if kube.endpoint.is_empty() {
                output.push_str("Endpoint: (none)\n");
            } else {
                output.push_str(&format!("Endpoint: {}\n", kube.endpoint));
            }
            output.push_str(&format!("From environment: {}\n", kube.from_environment));
        }
        EndpointData::Ecs(ecs) => {
            if ecs.credentials_from_env {
                output.push_str("Credentials: environment\n");
            } else {
                output.push_str(&format!("Profile: {}\n", ecs.profile));
            }
        }
        EndpointData::Local(_) => {}
    }
    output
}

pub fn format_context_inspect_result_json(result: &ContextInspectResult) -> String {
    serde_json::to_string_pretty(&record_json(&result.record)).unwrap_or_else(|_| "{}".to_string())
}

fn record_json(record: &ContextRecord) -> serde_json::Value {
    json!({
        "name": record.name,
        "type": record.context_type,
        "description": record.description,
        "created_at": record.created_at.to_rfc3339(),
        "endpoint": record.endpoint,
    })
}
