//! Response and request shapes for the Matriz HTTP API.
//!
//! Decoding is lenient: missing keys take defaults, scalars of the "wrong"
//! type are stringified, and flags follow JSON truthiness. The backend is not
//! ours and the CLI only displays these values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `GET /api/status`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceStatus {
    #[serde(deserialize_with = "truthy")]
    pub ok: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    /// Storage backend state, e.g. "connected".
    #[serde(deserialize_with = "lenient_string")]
    pub mongodb: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub environment: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

/// `data` member of `GET /api/backup/status`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct BackupStatus {
    #[serde(deserialize_with = "truthy")]
    pub running: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub interval_hours: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub total_backups: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_backup: Option<String>,
}

impl BackupStatus {
    /// Unwrap the `{ "data": { ... } }` envelope. A missing or empty `data`
    /// object counts as no backup information at all.
    pub fn from_envelope(body: &Value) -> Option<Result<Self, serde_json::Error>> {
        let data = body.get("data")?.as_object()?;
        if data.is_empty() {
            return None;
        }
        Some(serde_json::from_value(Value::Object(data.clone())))
    }
}

/// `POST /api/backup/create`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackupReceipt {
    #[serde(deserialize_with = "truthy")]
    pub success: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl BackupReceipt {
    /// Where the backend wrote the backup, when it says.
    pub fn path(&self) -> Option<String> {
        match self.data.as_ref()?.get("path")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Body of `POST /api/ai/test`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AiTestRequest {
    pub prompt: String,
}

/// Answer of `POST /api/ai/test`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AiTestResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub answer: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub hash: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ai_mode: Option<String>,
    #[serde(deserialize_with = "lenient_obsidian")]
    pub obsidian: ObsidianInfo,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObsidianInfo {
    #[serde(deserialize_with = "truthy")]
    pub enabled: bool,
}

/// Body of `POST /api/strategic-notes`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
}

/// Answer of `POST /api/strategic-notes`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NoteReceipt {
    #[serde(deserialize_with = "truthy")]
    pub success: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

/* ---- lenient field decoders ---- */

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn truthy<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(is_truthy(&Value::deserialize(de)?))
}

fn lenient_obsidian<'de, D>(de: D) -> Result<ObsidianInfo, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(ObsidianInfo {
        enabled: value.get("enabled").is_some_and(is_truthy),
    })
}

/// JSON truthiness: null, false, 0, "" and empty containers are false.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
