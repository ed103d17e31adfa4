use serde::{Deserialize, Serialize};

/// Three-valued answer for yes/no fields. `Unknown` is distinct from `No`:
/// an explicit "no" is an answer, an absent value is not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Flag {
    #[default]
    Unknown,
    Yes,
    No,
}

impl Flag {
    pub fn is_set(self) -> bool {
        self != Flag::Unknown
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Flag::Yes,
            Some(false) => Flag::No,
            None => Flag::Unknown,
        }
    }
}

impl From<Flag> for Option<bool> {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Yes => Some(true),
            Flag::No => Some(false),
            Flag::Unknown => None,
        }
    }
}

/// Fields the validator requires, in the order they are asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Location,
    Injuries,
    Owner,
}

impl Field {
    pub const REQUIRED: [Field; 4] = [Field::Date, Field::Location, Field::Injuries, Field::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Location => "location",
            Field::Injuries => "injuries",
            Field::Owner => "owner",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            Field::Date => "¿Cuál es la fecha del suceso?",
            Field::Location => "¿Dónde ocurrió el suceso?",
            Field::Injuries => "¿Hubo heridos en el incidente?",
            Field::Owner => "¿Eres el titular del objeto afectado?",
        }
    }
}

/// Running state of one reported incident. Serialized as the body of
/// `POST /api/analyze` and accepted back from the caller on the next turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    #[serde(default, deserialize_with = "non_empty")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default)]
    pub injuries: Flag,
    #[serde(default)]
    pub owner: Flag,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub question: String,
}

impl IncidentRecord {
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Date => self.date.is_some(),
            Field::Location => self.location.is_some(),
            Field::Injuries => self.injuries.is_set(),
            Field::Owner => self.owner.is_set(),
        }
    }

    /// One line per field, used to show the model what is already known.
    pub fn to_prompt(&self) -> String {
        fn text(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("(desconocido)")
        }
        fn flag(f: Flag) -> &'static str {
            match f {
                Flag::Yes => "true",
                Flag::No => "false",
                Flag::Unknown => "(desconocido)",
            }
        }

        format!(
            "- date: {}\n- location: {}\n- description: {}\n- injuries: {}\n- owner: {}",
            text(&self.date),
            text(&self.location),
            text(&self.description),
            flag(self.injuries),
            flag(self.owner),
        )
    }
}

/// Treats blank strings as absent, the way the model tends to fill unknowns.
pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
