use chrono::NaiveDate;

use crate::models::{ExtractedIncident, Flag, IncidentRecord};

use super::dates::{resolve_relative_date, DateFormat};
use super::rules::{self, Effect};

/// How a fresh extraction treats fields the record already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// A set field is never replaced by a later extraction.
    #[default]
    FirstWriteWins,
    /// Whatever the latest extraction provides replaces the record's value.
    Overwrite,
}

impl MergePolicy {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => MergePolicy::Overwrite,
            _ => MergePolicy::FirstWriteWins,
        }
    }
}

/// Patches the candidate with what the user's own words say. Phrase rules beat
/// the model: it is unreliable at resolving relative dates. A model date that
/// is not a calendar date is dropped so it can never count as answered.
pub fn apply_turn_rules(
    candidate: &mut ExtractedIncident,
    text: &str,
    today: NaiveDate,
    format: DateFormat,
) {
    if let Some(raw) = candidate.date.take() {
        match format.normalize(&raw) {
            Some(date) => candidate.date = Some(date),
            None => tracing::debug!(raw = %raw, "discarding unparsable date from model"),
        }
    }

    if let Some(date) = resolve_relative_date(text, today, format) {
        candidate.date = Some(date);
    }

    for effect in rules::effects_for(text) {
        if let Effect::Injuries(flag) = effect {
            candidate.injuries = flag;
        }
    }
}

/// Folds `candidate` into `record` under `policy`. Only data fields are
/// touched; `complete`/`question` belong to the validator.
pub fn merge(record: &mut IncidentRecord, candidate: ExtractedIncident, policy: MergePolicy) {
    merge_text(&mut record.date, candidate.date, policy);
    merge_text(&mut record.location, candidate.location, policy);
    merge_text(&mut record.description, candidate.description, policy);
    merge_flag(&mut record.injuries, candidate.injuries, policy);
    merge_flag(&mut record.owner, candidate.owner, policy);
}

fn merge_text(current: &mut Option<String>, incoming: Option<String>, policy: MergePolicy) {
    let Some(value) = incoming else { return };
    match policy {
        MergePolicy::FirstWriteWins if current.is_some() => {}
        _ => *current = Some(value),
    }
}

fn merge_flag(current: &mut Flag, incoming: Flag, policy: MergePolicy) {
    if !incoming.is_set() {
        return;
    }
    match policy {
        MergePolicy::FirstWriteWins if current.is_set() => {}
        _ => *current = incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn candidate_with_date(date: &str) -> ExtractedIncident {
        ExtractedIncident {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_write_wins_keeps_existing_date() {
        let mut record = IncidentRecord {
            date: Some("2023-12-31".to_string()),
            ..Default::default()
        };
        merge(&mut record, candidate_with_date("2024-01-01"), MergePolicy::FirstWriteWins);
        assert_eq!(record.date.as_deref(), Some("2023-12-31"));
    }

    #[test]
    fn test_overwrite_replaces_existing_date() {
        let mut record = IncidentRecord {
            date: Some("2023-12-31".to_string()),
            ..Default::default()
        };
        merge(&mut record, candidate_with_date("2024-01-01"), MergePolicy::Overwrite);
        assert_eq!(record.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_unset_fields_adopt_candidate() {
        let mut record = IncidentRecord {
            location: Some("Calle Luna 4".to_string()),
            ..Default::default()
        };
        let candidate = ExtractedIncident {
            location: Some("otra calle".to_string()),
            description: Some("Se inundó la cocina.".to_string()),
            injuries: Flag::No,
            ..Default::default()
        };
        merge(&mut record, candidate, MergePolicy::FirstWriteWins);
        assert_eq!(record.location.as_deref(), Some("Calle Luna 4"));
        assert_eq!(record.description.as_deref(), Some("Se inundó la cocina."));
        assert_eq!(record.injuries, Flag::No);
        assert_eq!(record.owner, Flag::Unknown);
    }

    #[test]
    fn test_explicit_false_is_not_overwritten() {
        let mut record = IncidentRecord {
            owner: Flag::No,
            ..Default::default()
        };
        let candidate = ExtractedIncident {
            owner: Flag::Yes,
            ..Default::default()
        };
        merge(&mut record, candidate, MergePolicy::FirstWriteWins);
        assert_eq!(record.owner, Flag::No);
    }

    #[test]
    fn test_overwrite_keeps_values_candidate_lacks() {
        let mut record = IncidentRecord {
            owner: Flag::Yes,
            location: Some("Plaza Mayor".to_string()),
            ..Default::default()
        };
        merge(&mut record, ExtractedIncident::default(), MergePolicy::Overwrite);
        assert_eq!(record.owner, Flag::Yes);
        assert_eq!(record.location.as_deref(), Some("Plaza Mayor"));
    }

    #[test]
    fn test_relative_date_beats_model_date() {
        let mut candidate = candidate_with_date("2020-01-01");
        apply_turn_rules(&mut candidate, "ayer se cayó una teja", today(), DateFormat::Iso);
        assert_eq!(candidate.date.as_deref(), Some("2024-06-14"));
    }

    #[test]
    fn test_model_date_kept_without_phrase() {
        let mut candidate = candidate_with_date("2024-05-30");
        apply_turn_rules(&mut candidate, "el 30 de mayo", today(), DateFormat::Iso);
        assert_eq!(candidate.date.as_deref(), Some("2024-05-30"));
    }

    #[test]
    fn test_unparsable_model_date_is_dropped() {
        let mut candidate = candidate_with_date("desconocida");
        apply_turn_rules(&mut candidate, "se rompió la puerta", today(), DateFormat::Iso);
        assert_eq!(candidate.date, None);
    }

    #[test]
    fn test_model_date_normalized_to_configured_format() {
        let mut candidate = candidate_with_date("2024-05-30");
        apply_turn_rules(&mut candidate, "el 30 de mayo", today(), DateFormat::DayFirst);
        assert_eq!(candidate.date.as_deref(), Some("30-05-2024"));
    }

    #[test]
    fn test_fall_forces_injuries() {
        let mut candidate = ExtractedIncident {
            injuries: Flag::No,
            ..Default::default()
        };
        apply_turn_rules(&mut candidate, "me caí en la calle", today(), DateFormat::Iso);
        assert_eq!(candidate.injuries, Flag::Yes);
    }

    #[test]
    fn test_fall_with_negation() {
        let mut candidate = ExtractedIncident {
            injuries: Flag::Yes,
            ..Default::default()
        };
        apply_turn_rules(&mut candidate, "me caí, no hubo heridos", today(), DateFormat::Iso);
        assert_eq!(candidate.injuries, Flag::No);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(MergePolicy::parse("overwrite"), MergePolicy::Overwrite);
        assert_eq!(MergePolicy::parse("first_write_wins"), MergePolicy::FirstWriteWins);
        assert_eq!(MergePolicy::parse(""), MergePolicy::FirstWriteWins);
    }
}
