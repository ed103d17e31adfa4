use serde::{Deserialize, Deserializer};

use super::{ConversationEntry, IncidentRecord};

/// Body of `POST /api/analyze`.
///
/// `record` carries the state returned by the previous turn; `session_id`
/// asks the server to keep that state instead. With neither, every call starts
/// a fresh incident.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Anything but a string counts as missing.
    #[serde(default, deserialize_with = "text_only")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conversation: Vec<ConversationEntry>,
    #[serde(default)]
    pub record: Option<IncidentRecord>,
    #[serde(default)]
    pub session_id: Option<String>,
}

fn text_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ConversationEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ConversationEntry>>::deserialize(deserializer)?.unwrap_or_default())
}
