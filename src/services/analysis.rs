use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{AnalyzeRequest, ConversationEntry, IncidentRecord};
use crate::services::ai::extraction::{build_prompt, parse_extraction};
use crate::services::merge::{apply_turn_rules, merge};
use crate::services::validator::{pending_field, validate};
use crate::state::AppState;

/// One conversation turn: extract, merge, validate.
///
/// The prior record is only replaced once the whole turn succeeded, so a
/// failing upstream call leaves the caller's or the session's state as it was.
pub async fn analyze(
    state: &AppState,
    request: AnalyzeRequest,
    today: NaiveDate,
) -> Result<IncidentRecord, AppError> {
    let AnalyzeRequest {
        text,
        conversation,
        record,
        session_id,
    } = request;

    let text = text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::InvalidRequest("text"))?;

    let mut record = match (record, session_id.as_deref()) {
        (Some(record), _) => record,
        (None, Some(id)) => state.sessions.get(id).unwrap_or_default(),
        (None, None) => IncidentRecord::default(),
    };

    let config = &state.config;
    record.date = record
        .date
        .take()
        .and_then(|date| config.date_format.normalize(&date));
    let prompt = build_prompt(text, &conversation, &record, today, config.date_format);

    let raw = match tokio::time::timeout(config.ai_timeout, state.llm.complete(&prompt)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "completion service failed");
            return Err(AppError::Upstream(format!("{e:#}")));
        }
        Err(_) => {
            tracing::error!(timeout_secs = config.ai_timeout.as_secs(), "completion service timed out");
            return Err(AppError::Upstream("timed out".to_string()));
        }
    };

    if raw.trim().is_empty() {
        tracing::error!("completion service returned no text");
        return Err(AppError::Upstream("empty completion".to_string()));
    }

    let mut candidate = parse_extraction(&raw).map_err(|e| {
        tracing::error!(error = %e, raw = %raw, "model returned malformed JSON");
        AppError::MalformedResponse(e.to_string())
    })?;

    tracing::debug!(
        model_complete = ?candidate.complete,
        model_question = ?candidate.question,
        "model verdict (ignored)"
    );

    apply_turn_rules(&mut candidate, text, today, config.date_format);
    merge(&mut record, candidate, config.merge_policy);

    let mut history = conversation;
    history.push(ConversationEntry::user(text));
    validate(&mut record, &history);

    if let Some(id) = session_id.as_deref() {
        state.sessions.save(id, &record);
    }

    tracing::info!(
        complete = record.complete,
        pending = pending_field(&record).map(|f| f.as_str()).unwrap_or(""),
        "incident analyzed"
    );

    Ok(record)
}
