// Auth domain handlers
pub mod admin_handler;
pub mod auth_handler;
pub mod health_handler;
pub mod internal_handler;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use crate::shared::errors::AuthError;

/// JSON 본문 파싱 실패는 400으로 통일
/// Unreadable or malformed JSON bodies are validation errors
pub(crate) fn read_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AuthError::Validation(format!("Invalid request body: {}", e.body_text())))
}
