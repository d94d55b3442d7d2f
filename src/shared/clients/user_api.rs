use std::time::Duration;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use crate::domains::auth::models::{Credentials, OAuthLoginRequest, User};
use crate::shared::errors::BridgeError;

/// 사용자 디렉터리 인터페이스 (외부 서비스)
/// User directory seen from this service.
///
/// `Ok(None)` means "no such user"; `Err(BridgeError::Unavailable)` means the
/// directory could not answer. Callers must never treat one as the other.
#[async_trait]
pub trait IdentityBridge: Send + Sync {
    /// 비밀번호 로그인 검증
    /// Verify direct-login credentials
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, BridgeError>;

    /// OAuth 신원 확인 (첫 로그인 시 디렉터리가 사용자 생성)
    /// Resolve (or let the directory create) the user behind an OAuth identity
    async fn resolve_oauth(&self, request: &OAuthLoginRequest) -> Result<Option<User>, BridgeError>;

    /// ID로 사용자 조회
    /// Fetch a user by id
    async fn get_by_id(&self, user_id: u64) -> Result<Option<User>, BridgeError>;
}

// 사용자 디렉터리 HTTP 클라이언트
// HTTP client for the user directory service
pub struct UserApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl UserApiClient {
    // 클라이언트 생성 (타임아웃은 UpstreamUnavailable로 처리됨)
    // Create client; a timed-out call surfaces as BridgeError::Unavailable
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create user directory HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 응답 해석: 성공은 사용자, `not_found` 상태는 None, 나머지는 장애
    /// Interpret a directory response
    async fn read_user(
        response: reqwest::Response,
        not_found: &[StatusCode],
    ) -> Result<Option<User>, BridgeError> {
        let status = response.status();
        if status.is_success() {
            let user: User = response
                .json()
                .await
                .map_err(|e| BridgeError::Unavailable(format!("malformed user payload: {}", e)))?;
            return Ok(Some(user));
        }

        if not_found.contains(&status) {
            return Ok(None);
        }

        Err(BridgeError::Unavailable(format!(
            "user directory returned status {}",
            status
        )))
    }
}

#[async_trait]
impl IdentityBridge for UserApiClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, BridgeError> {
        let url = format!("{}/user/auth/authenticate", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user directory authenticate call failed");
                BridgeError::from(e)
            })?;

        Self::read_user(response, &[StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND]).await
    }

    async fn resolve_oauth(&self, request: &OAuthLoginRequest) -> Result<Option<User>, BridgeError> {
        let url = format!("{}/user/auth/oauth", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, provider = request.provider.as_str(), "user directory oauth call failed");
                BridgeError::from(e)
            })?;

        Self::read_user(response, &[StatusCode::BAD_REQUEST]).await
    }

    async fn get_by_id(&self, user_id: u64) -> Result<Option<User>, BridgeError> {
        let url = format!("{}/user/{}", self.base_url, user_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id, "user directory lookup failed");
                BridgeError::from(e)
            })?;

        Self::read_user(response, &[StatusCode::NOT_FOUND]).await
    }
}
