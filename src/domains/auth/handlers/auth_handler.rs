use crate::domains::auth::handlers::read_json;
use crate::domains::auth::models::{
    ClientContext, LoginRequest, LoginResponse, MessageResponse, OAuthRequest,
    RefreshTokenRequest, RevokedCountResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::AuthError;
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

// 로그인 핸들러
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "User directory or store failure")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    client: ClientContext,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = read_json(payload).map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let response = app_state
        .auth_state
        .auth_service
        .login(request, &client)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

// OAuth 수동 로그인 핸들러
#[utoipa::path(
    post,
    path = "/oauth",
    request_body = OAuthRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid provider or email, or the directory rejected the identity"),
        (status = 500, description = "User directory or store failure")
    ),
    tag = "Auth"
)]
pub async fn oauth(
    State(app_state): State<AppState>,
    client: ClientContext,
    payload: Result<Json<OAuthRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = read_json(payload).map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let response = app_state
        .auth_state
        .auth_service
        .oauth_login(request, &client)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 토큰 갱신 핸들러
/// Refresh token handler
#[utoipa::path(
    post,
    path = "/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = LoginResponse),
        (status = 400, description = "Missing refresh token"),
        (status = 401, description = "Invalid, expired or revoked refresh token"),
        (status = 500, description = "User directory or store failure")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    client: ClientContext,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = read_json(payload).map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let response = app_state
        .auth_state
        .auth_service
        .refresh(request.refresh_token, &client)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 로그아웃 핸들러
/// Logout handler
#[utoipa::path(
    post,
    path = "/logout",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 400, description = "Missing, invalid or already revoked token"),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = read_json(payload).map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    app_state
        .auth_state
        .auth_service
        .logout(authenticated_user.user_id, request.refresh_token)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// 모든 기기 로그아웃 핸들러
/// Logout-all handler
#[utoipa::path(
    post,
    path = "/logout-all",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "All sessions revoked", body = RevokedCountResponse),
        (status = 400, description = "Missing or invalid refresh token"),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn logout_all(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<RevokedCountResponse>, (StatusCode, Json<serde_json::Value>)> {
    let request = read_json(payload).map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let revoked_count = app_state
        .auth_state
        .auth_service
        .logout_all(authenticated_user.user_id, request.refresh_token)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RevokedCountResponse {
        message: format!(
            "Logged out from all devices successfully. {} tokens revoked.",
            revoked_count
        ),
        revoked_count,
    }))
}
