use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request-level failures. `Display` is what the caller sees; the wrapped
/// detail is only for the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Falta el parámetro '{0}'")]
    InvalidRequest(&'static str),

    #[error("Cuerpo de la solicitud inválido.")]
    InvalidBody(String),

    #[error("Error al procesar la respuesta de la IA.")]
    Upstream(String),

    #[error("La IA devolvió un JSON mal formado.")]
    MalformedResponse(String),

    #[error("Origen no permitido")]
    Forbidden(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        match &self {
            AppError::InvalidBody(detail)
            | AppError::Upstream(detail)
            | AppError::MalformedResponse(detail)
            | AppError::Forbidden(detail) => {
                tracing::warn!(status = %status, detail = %detail, "request failed");
            }
            AppError::InvalidRequest(param) => {
                tracing::warn!(status = %status, param, "invalid request");
            }
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
