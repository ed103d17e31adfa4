use serde::{Deserialize, Deserializer};

use super::incident::{non_empty, Flag};

/// Candidate field-set parsed from the completion service's reply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedIncident {
    #[serde(default, deserialize_with = "non_empty")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub injuries: Flag,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub owner: Flag,
    /// The model's own verdict. Logged, never trusted.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub complete: Option<bool>,
    #[serde(default, deserialize_with = "non_empty")]
    pub question: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Text(String),
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<BoolLike> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(BoolLike::Bool(b)) => Some(b),
        Some(BoolLike::Text(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "sí" | "si" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        None => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Flag, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_bool(deserializer).map(Flag::from)
}
