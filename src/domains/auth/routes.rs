// Auth domain routes
// 인증 도메인 라우터
use axum::{routing::{delete, post}, Router};
use crate::domains::auth::handlers::{admin_handler, auth_handler, internal_handler};
use crate::shared::services::AppState;

/// Create authentication router
/// 인증 라우터 생성
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth_handler::login))
        .route("/oauth", post(auth_handler::oauth))
        .route("/refresh", post(auth_handler::refresh))
        .route("/logout", post(auth_handler::logout))
        .route("/logout-all", post(auth_handler::logout_all))
}

/// 서비스 간 호출 라우터 (x-internal-api-key 필요)
/// Create service-to-service router
pub fn create_internal_router() -> Router<AppState> {
    Router::new()
        .route("/auth/revoke-user-tokens", post(internal_handler::revoke_user_tokens))
}

/// 관리자 라우터 (운영 환경에서는 마운트하지 않음)
/// Create admin router; only mounted outside production
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/tokens/all", delete(admin_handler::revoke_all_tokens))
        .route("/tokens/:user_id", delete(admin_handler::revoke_user_tokens))
}
