use std::sync::Arc;
use anyhow::Result;
use crate::shared::clients::{IdentityBridge, UserApiClient};
use crate::shared::config::Config;
use crate::shared::database::{Database, RefreshTokenRepository, RefreshTokenStore};
use crate::domains::auth::services::{AuthState, JwtService};

/// Application state (combines all domain states)
/// 애플리케이션 상태
///
/// Holds no per-request data; every request flows its authenticated subject
/// explicitly through extractors and service arguments.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_state: AuthState,
}

impl AppState {
    /// Create AppState with database and the user directory client
    /// 운영용 구성: PostgreSQL 저장소 + HTTP 사용자 디렉터리
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let store: Arc<dyn RefreshTokenStore> = Arc::new(RefreshTokenRepository::new(db.pool().clone()));
        let identity: Arc<dyn IdentityBridge> =
            Arc::new(UserApiClient::new(&config.user_api_url, config.user_api_timeout)?);

        Ok(Self::with_components(config, store, identity))
    }

    /// 저장소와 사용자 디렉터리를 직접 주입 (테스트, 로컬 실행)
    /// Build state from explicit collaborators
    pub fn with_components(
        config: Config,
        store: Arc<dyn RefreshTokenStore>,
        identity: Arc<dyn IdentityBridge>,
    ) -> Self {
        let jwt_service = JwtService::new(&config.jwt);
        let auth_state = AuthState::new(
            jwt_service,
            store,
            identity,
            !config.mode.is_production(),
            config.cleanup_interval,
        );

        Self {
            config: Arc::new(config),
            auth_state,
        }
    }
}
