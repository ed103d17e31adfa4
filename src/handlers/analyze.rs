use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AnalyzeRequest, IncidentRecord};
use crate::services::analysis;
use crate::state::AppState;

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<IncidentRecord>, AppError> {
    let Json(payload) = payload?;

    let span = tracing::info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        session_id = payload.session_id.as_deref().unwrap_or(""),
    );

    span.in_scope(|| {
        tracing::info!(
            text = payload.text.as_deref().unwrap_or(""),
            turns = payload.conversation.len(),
            stateless = payload.record.is_some(),
            "received analyze request"
        );
    });

    let today = Local::now().date_naive();
    let record = analysis::analyze(&state, payload, today)
        .instrument(span)
        .await?;

    Ok(Json(record))
}
