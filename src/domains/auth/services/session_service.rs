use std::sync::Arc;
use chrono::Utc;
use crate::domains::auth::models::{ClientContext, LoginResponse, RefreshTokenCreate, User};
use crate::domains::auth::services::JwtService;
use crate::shared::database::RefreshTokenStore;
use crate::shared::errors::AuthError;

/// 세션 발급 서비스
/// Session issuer: mints an access/refresh pair for an already authenticated user.
///
/// The refresh token is only returned after its store record has been created;
/// a signed refresh token without a record would be impossible to revoke.
#[derive(Clone)]
pub struct SessionIssuer {
    jwt_service: JwtService,
    store: Arc<dyn RefreshTokenStore>,
}

impl SessionIssuer {
    pub fn new(jwt_service: JwtService, store: Arc<dyn RefreshTokenStore>) -> Self {
        Self { jwt_service, store }
    }

    /// 토큰 쌍 발급
    /// Issue a new token pair and persist the refresh record
    pub async fn issue(&self, user: User, client: &ClientContext) -> Result<LoginResponse, AuthError> {
        // 1. Access Token 발급
        let access_token = self.jwt_service.generate_access_token(user.id)?;

        // 2. 새 token id 생성
        let token_id = self.jwt_service.generate_token_id();

        // 3. Refresh Token 발급 (token id 포함)
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, &token_id)?;

        // 4. 저장소에 기록 (반환 전에 반드시 완료)
        let expires_at = chrono::Duration::from_std(self.jwt_service.refresh_ttl())
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| AuthError::Internal("Refresh token lifetime out of range".to_string()))?;

        self.store
            .create(RefreshTokenCreate {
                user_id: user.id,
                token_id,
                ip_address: client.ip_address.clone(),
                user_agent: client.user_agent.clone(),
                expires_at,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = user.id, "failed to persist refresh token");
                AuthError::from(e)
            })?;

        tracing::debug!(user_id = user.id, "session issued");

        // 5. 최소 사용자 정보와 함께 반환
        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }
}
