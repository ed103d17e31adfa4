use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    #[serde(alias = "IA", alias = "ia", alias = "model")]
    Assistant,
}

impl Role {
    /// Speaker label used when the history is rendered into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Usuario",
            Role::Assistant => "IA",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
