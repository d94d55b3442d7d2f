// Auth domain state
// 인증 도메인 상태
use std::sync::Arc;
use crate::domains::auth::services::{AuthService, JwtService, TokenCleanupScheduler};
use crate::shared::clients::IdentityBridge;
use crate::shared::database::RefreshTokenStore;
use tokio::time::Duration;

/// Auth domain state
/// 인증 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
    pub cleanup_scheduler: TokenCleanupScheduler,
}

impl AuthState {
    /// Create AuthState from its collaborators
    /// 저장소와 사용자 디렉터리는 trait 객체로 주입 (테스트에서 교체 가능)
    pub fn new(
        jwt_service: JwtService,
        store: Arc<dyn RefreshTokenStore>,
        identity: Arc<dyn IdentityBridge>,
        admin_enabled: bool,
        cleanup_period: Duration,
    ) -> Self {
        Self {
            auth_service: AuthService::new(jwt_service.clone(), store.clone(), identity, admin_enabled),
            jwt_service,
            cleanup_scheduler: TokenCleanupScheduler::new(store, cleanup_period),
        }
    }
}
