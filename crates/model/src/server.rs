use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the server's status endpoint.
///
/// Only a few well-known fields are picked out; the rest is kept as-is
/// since different server versions report different things.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Path of the loaded model, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_file: Option<String>,
    /// Identifier of the loaded model, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Server version, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Everything else the server returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The bot's domain: what it understands and what it can do.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Intents, either plain names or objects keyed by name.
    #[serde(default)]
    pub intents: Vec<Value>,
    /// Entities, either plain names or objects keyed by name.
    #[serde(default)]
    pub entities: Vec<Value>,
    /// Action names.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Response templates keyed by name.
    #[serde(default)]
    pub responses: Map<String, Value>,
    /// Everything else the server returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainInfo {
    /// Returns the intent names, regardless of how each entry is written.
    pub fn intent_names(&self) -> Vec<&str> {
        self.intents.iter().filter_map(entry_name).collect()
    }

    /// Returns the entity names, regardless of how each entry is written.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().filter_map(entry_name).collect()
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(name) => Some(name),
        Value::Object(map) => map.keys().next().map(String::as_str),
        _ => None,
    }
}
