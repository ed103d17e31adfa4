//! Keyword heuristics applied to the user's own words.
//!
//! Every free-text rule lives in one of the two tables below so the rules can
//! be read and tested without going through the request path:
//! - [`TURN_RULES`] patch the model's extraction from the current turn's text.
//! - [`ANSWER_HINTS`] tell the validator a field was already addressed in the
//!   conversation even if nothing was captured for it.

use crate::models::{ConversationEntry, Field, Flag, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Yesterday,
}

impl RelativeDay {
    pub fn days_back(&self) -> i64 {
        match self {
            RelativeDay::Today => 0,
            RelativeDay::Yesterday => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Date(RelativeDay),
    Injuries(Flag),
}

#[derive(Debug)]
pub struct KeywordRule {
    /// Any of these fires the rule.
    pub keywords: &'static [&'static str],
    /// Any of these suppresses it.
    pub unless: &'static [&'static str],
    pub effect: Effect,
}

pub const NO_INJURIES: &str = "no hubo heridos";

pub const TURN_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["hoy"],
        unless: &[],
        effect: Effect::Date(RelativeDay::Today),
    },
    KeywordRule {
        keywords: &["ayer"],
        unless: &["hoy"],
        effect: Effect::Date(RelativeDay::Yesterday),
    },
    // Falls are assumed to hurt someone unless the user says otherwise.
    KeywordRule {
        keywords: &["caí", "caída"],
        unless: &[NO_INJURIES],
        effect: Effect::Injuries(Flag::Yes),
    },
    KeywordRule {
        keywords: &[NO_INJURIES],
        unless: &[],
        effect: Effect::Injuries(Flag::No),
    },
];

pub const ANSWER_HINTS: &[(Field, &[&str])] = &[
    (Field::Date, &["hoy", "ayer", "fecha"]),
    (Field::Location, &["lugar", "dirección", "domicilio"]),
    (
        Field::Injuries,
        &["herido", "heridos", "herida", "heridas", "lesionado", "lesionados"],
    ),
    (Field::Owner, &["titular", "dueño", "dueña"]),
];

impl KeywordRule {
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| contains_word(&text, k))
            && !self.unless.iter().any(|k| contains_word(&text, k))
    }
}

/// Effects of every rule that fires on `text`, in table order.
pub fn effects_for(text: &str) -> Vec<Effect> {
    TURN_RULES
        .iter()
        .filter(|rule| rule.matches(text))
        .map(|rule| rule.effect)
        .collect()
}

pub fn relative_day(text: &str) -> Option<RelativeDay> {
    effects_for(text).into_iter().find_map(|effect| match effect {
        Effect::Date(day) => Some(day),
        _ => None,
    })
}

/// Whether a user turn in `history` mentions one of the field's hint words.
pub fn answered_in_history(field: Field, history: &[ConversationEntry]) -> bool {
    let Some((_, hints)) = ANSWER_HINTS.iter().find(|(f, _)| *f == field) else {
        return false;
    };

    history
        .iter()
        .filter(|entry| entry.role == Role::User)
        .map(|entry| entry.content.to_lowercase())
        .any(|content| hints.iter().any(|h| contains_word(&content, h)))
}

/// Substring match that refuses to match inside a longer word, so "hoy" does
/// not fire on "ahoyado" and "caí" does not fire on "caída" by accident.
/// `text` and `needle` are expected to be lowercase already.
pub fn contains_word(text: &str, needle: &str) -> bool {
    text.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
