//! Resource formatting: identity, href derivation and field defaulting.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::{DiagnoseIncident, Incident, IncidentInput, ResolveIncident, TaskInput};

/// Path prefix every resource lives under.
pub const API_BASE: &str = "/tmf-api/Incident/v4";

pub const INCIDENT: &str = "incident";
pub const DIAGNOSE_INCIDENT: &str = "diagnoseIncident";
pub const RESOLVE_INCIDENT: &str = "resolveIncident";

pub const DEFAULT_ACK_STATE: &str = "acknowledged";
/// Incident reference used when a task is created without one.
pub const UNKNOWN_INCIDENT_ID: &str = "unknown-incident-id";

/// `{API_BASE}/{resource}/{id}`.
pub fn href_for(resource: &str, id: &str) -> String {
  format!("{}/{}/{}", API_BASE, resource, id)
}

/// Fresh UUID v4 string.
pub fn generate_id() -> String {
  Uuid::new_v4().to_string()
}

/// Build the canonical Incident from an unvalidated payload. Never fails.
///
/// - `id`: kept verbatim when supplied and non-empty, otherwise generated.
/// - `ackState`: defaults to `"acknowledged"`.
/// - `sourceObject`: always a sequence (see [`normalize_source_object`]).
pub fn format_incident(raw: IncidentInput) -> Incident {
  let id = non_empty(raw.id).unwrap_or_else(generate_id);
  let href = href_for(INCIDENT, &id);

  Incident {
    id,
    ack_state: non_empty(raw.ack_state).unwrap_or_else(|| DEFAULT_ACK_STATE.to_string()),
    category: raw.category,
    domain: raw.domain,
    href,
    name: raw.name,
    occur_time: raw.occur_time,
    priority: raw.priority,
    state: raw.state,
    source_object: normalize_source_object(raw.source_object),
  }
}

/// Arrays pass through; any other truthy value is wrapped; absent or falsy
/// values become `[{}]`.
pub fn normalize_source_object(value: Option<Value>) -> Vec<Value> {
  match value {
    Some(Value::Array(items)) => items,
    Some(v) if is_truthy(&v) => vec![v],
    _ => vec![Value::Object(Map::new())],
  }
}

pub fn new_diagnose_incident(raw: TaskInput) -> DiagnoseIncident {
  let id = generate_id();
  DiagnoseIncident {
    href: href_for(DIAGNOSE_INCIDENT, &id),
    id,
    incident: incident_ref(raw.incident),
  }
}

pub fn new_resolve_incident(raw: TaskInput) -> ResolveIncident {
  let id = generate_id();
  ResolveIncident {
    href: href_for(RESOLVE_INCIDENT, &id),
    id,
    incident: incident_ref(raw.incident),
  }
}

/// The referenced incident is not looked up; a missing reference gets the
/// placeholder id.
fn incident_ref(value: Option<Value>) -> Value {
  match value {
    Some(v) if is_truthy(&v) => v,
    _ => {
      let mut placeholder = Map::new();
      placeholder.insert("id".into(), Value::String(UNKNOWN_INCIDENT_ID.into()));
      Value::Object(placeholder)
    }
  }
}

fn non_empty(s: Option<String>) -> Option<String> {
  s.filter(|s| !s.is_empty())
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
