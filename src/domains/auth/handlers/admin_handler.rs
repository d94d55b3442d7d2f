use crate::domains::auth::models::RevokedCountResponse;
use crate::shared::errors::AuthError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// 관리자: 전체 토큰 무효화 (운영 환경에서는 라우트 자체가 없음)
/// Admin: revoke every live refresh token
#[utoipa::path(
    delete,
    path = "/admin/tokens/all",
    responses(
        (status = 200, description = "Tokens revoked", body = RevokedCountResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Admin"
)]
pub async fn revoke_all_tokens(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<RevokedCountResponse>, (StatusCode, Json<serde_json::Value>)> {
    tracing::warn!(requested_by = authenticated_user.user_id, "admin revoke of all tokens");

    let revoked_count = app_state
        .auth_state
        .auth_service
        .revoke_all_tokens()
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let message = if revoked_count == 0 {
        "No active tokens found for any user".to_string()
    } else {
        format!("Successfully revoked {} tokens for all users", revoked_count)
    };

    Ok(Json(RevokedCountResponse { message, revoked_count }))
}

/// 관리자: 특정 사용자 토큰 무효화
/// Admin: revoke every live refresh token of one user
#[utoipa::path(
    delete,
    path = "/admin/tokens/{user_id}",
    params(
        ("user_id" = u64, Path, description = "User whose tokens are revoked")
    ),
    responses(
        (status = 200, description = "Tokens revoked", body = RevokedCountResponse),
        (status = 400, description = "Invalid userId parameter"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Admin"
)]
pub async fn revoke_user_tokens(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<Json<RevokedCountResponse>, (StatusCode, Json<serde_json::Value>)> {
    let user_id: u64 = user_id
        .parse()
        .map_err(|_| AuthError::Validation("Invalid userId parameter".to_string()))
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    tracing::info!(requested_by = authenticated_user.user_id, user_id, "admin revoke of user tokens");

    let revoked_count = app_state
        .auth_state
        .auth_service
        .revoke_user_tokens(user_id)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let message = if revoked_count == 0 {
        format!("No active tokens found for user {}", user_id)
    } else {
        format!("Successfully revoked {} tokens for user {}", revoked_count, user_id)
    };

    Ok(Json(RevokedCountResponse { message, revoked_count }))
}
