// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::{routing::get, Router};
use crate::shared::config::DeploymentMode;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::auth::handlers::health_handler;
use crate::domains::auth::routes::{create_admin_router, create_auth_router, create_internal_router};

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (운영 환경에서는 /admin 제외)
pub fn create_router(mode: DeploymentMode) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health_handler::health))
        .merge(create_auth_router())
        .nest("/internal", create_internal_router());

    if mode.is_production() {
        router
    } else {
        router.nest("/admin", create_admin_router())
    }
}
