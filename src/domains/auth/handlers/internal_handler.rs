use crate::domains::auth::handlers::read_json;
use crate::domains::auth::models::{RevokeSubjectRequest, RevokedCountResponse};
use crate::shared::errors::AuthError;
use crate::shared::middleware::InternalCaller;
use crate::shared::services::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

/// 내부 서비스: 사용자 토큰 일괄 무효화
/// Service-to-service bulk revoke for one subject
#[utoipa::path(
    post,
    path = "/internal/auth/revoke-user-tokens",
    request_body = RevokeSubjectRequest,
    responses(
        (status = 200, description = "Tokens revoked", body = RevokedCountResponse),
        (status = 400, description = "Missing or invalid subjectId"),
        (status = 401, description = "Missing or invalid internal API key"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("InternalApiKey" = [])
    ),
    tag = "Internal"
)]
pub async fn revoke_user_tokens(
    State(app_state): State<AppState>,
    _caller: InternalCaller,
    payload: Result<Json<RevokeSubjectRequest>, JsonRejection>,
) -> Result<Json<RevokedCountResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = read_json(payload).map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let user_id = request
        .subject_id
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .filter(|id| *id > 0)
        .ok_or_else(|| AuthError::Validation("Missing or invalid subjectId".to_string()))
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let revoked_count = app_state
        .auth_state
        .auth_service
        .revoke_user_tokens(user_id)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RevokedCountResponse {
        message: format!("Successfully revoked {} tokens for user {}", revoked_count, user_id),
        revoked_count,
    }))
}
