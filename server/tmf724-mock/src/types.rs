//! Resource types for the TMF724 API (JSON contracts + stored records).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// Body of `POST /incident`. Unknown fields (including `href`) are ignored.
///
/// Every field is optional. Numbers and booleans are kept as their string form;
/// `null`, arrays and objects in a string field read as absent. `id` and
/// `ackState` also treat falsy values (`0`, `false`, `""`) as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentInput {
  #[serde(default, deserialize_with = "truthy_string")]
  pub id: Option<String>,
  #[serde(default, deserialize_with = "truthy_string")]
  pub ack_state: Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub category: Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub domain: Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub occur_time: Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub priority: Option<String>,
  #[serde(default, deserialize_with = "lenient_string")]
  pub state: Option<String>,
  #[serde(default)]
  pub source_object: Option<Value>,
}

/// Body of `POST /diagnoseIncident` and `POST /resolveIncident`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
  #[serde(default)]
  pub incident: Option<Value>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(scalar_string(Value::deserialize(deserializer)?))
}

fn truthy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  let falsy = match &value {
    Value::Bool(b) => !b,
    Value::Number(n) => n.as_f64() == Some(0.0),
    Value::String(s) => s.is_empty(),
    _ => false,
  };
  Ok(if falsy { None } else { scalar_string(value) })
}

fn scalar_string(value: Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => None,
  }
}

// ---------------------------------------------------------------------------
// Stored records (JSON contract — what we return)
// ---------------------------------------------------------------------------

/// Canonical incident resource. `href` is always derived from `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
  pub id: String,
  pub ack_state: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub domain: Option<String>,
  pub href: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub occur_time: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub priority: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  pub source_object: Vec<Value>,
}

impl From<Incident> for IncidentInput {
  fn from(incident: Incident) -> Self {
    Self {
      id: Some(incident.id),
      ack_state: Some(incident.ack_state),
      category: incident.category,
      domain: incident.domain,
      name: incident.name,
      occur_time: incident.occur_time,
      priority: incident.priority,
      state: incident.state,
      source_object: Some(Value::Array(incident.source_object)),
    }
  }
}

/// Diagnose task wrapping an incident reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseIncident {
  pub id: String,
  pub href: String,
  pub incident: Value,
}

/// Resolve task wrapping an incident reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveIncident {
  pub id: String,
  pub href: String,
  pub incident: Value,
}

/// JSON body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}

impl ErrorBody {
  pub fn new(error: impl Into<String>) -> Self {
    Self {
      error: error.into(),
    }
  }
}
