use crate::models::{ConversationEntry, Field, IncidentRecord};

use super::rules;

/// Sets `complete` and `question` on `record`. Data fields are never touched,
/// so running it again on the same input gives the same result.
///
/// At most one question is asked per turn, in [`Field::REQUIRED`] order. A
/// field the user already talked about (per the history hints) is skipped
/// while another unset field remains to be asked about.
pub fn validate(record: &mut IncidentRecord, history: &[ConversationEntry]) {
    let unset: Vec<Field> = Field::REQUIRED
        .into_iter()
        .filter(|f| !record.is_set(*f))
        .collect();

    let Some(first_unset) = unset.first().copied() else {
        record.complete = true;
        record.question.clear();
        return;
    };

    let target = unset
        .iter()
        .copied()
        .find(|f| !rules::answered_in_history(*f, history))
        .unwrap_or(first_unset);

    record.complete = false;
    record.question = target.question().to_string();
}

/// The field the record's current question asks about, if any.
pub fn pending_field(record: &IncidentRecord) -> Option<Field> {
    Field::REQUIRED
        .into_iter()
        .find(|f| f.question() == record.question)
}
