use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::state::AppState;

/// Rejects browser requests from origins outside `ALLOWED_ORIGINS`.
/// Requests without an `Origin` header (curl, server-to-server) pass.
pub async fn require_allowed_origin(
    State(state): State<Arc<AppState>>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|v| v.to_str().unwrap_or_default().to_string());

    match origin {
        Some(origin) if !state.config.origin_allowed(&origin) => {
            tracing::warn!(origin = %origin, "rejected request from disallowed origin");
            AppError::Forbidden(origin).into_response()
        }
        _ => next.run(req).await,
    }
}
