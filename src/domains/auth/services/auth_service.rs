use std::sync::Arc;
use crate::domains::auth::models::{
    ClientContext, Credentials, IdentifierType, LoginRequest, LoginResponse, OAuthAssertion,
    OAuthLoginRequest, OAuthProvider, OAuthRequest, RefreshClaims,
};
use crate::domains::auth::services::{JwtService, SessionIssuer};
use crate::shared::clients::IdentityBridge;
use crate::shared::database::RefreshTokenStore;
use crate::shared::errors::AuthError;

// 인증 서비스
// AuthService: login, OAuth login, refresh rotation and revocation flows
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    store: Arc<dyn RefreshTokenStore>,
    identity: Arc<dyn IdentityBridge>,
    issuer: SessionIssuer,
    admin_enabled: bool,
}

impl AuthService {
    // 생성자
    // admin_enabled=false 이면 전체 무효화(revoke_all_tokens) 거부
    pub fn new(
        jwt_service: JwtService,
        store: Arc<dyn RefreshTokenStore>,
        identity: Arc<dyn IdentityBridge>,
        admin_enabled: bool,
    ) -> Self {
        let issuer = SessionIssuer::new(jwt_service.clone(), store.clone());
        Self {
            jwt_service,
            store,
            identity,
            issuer,
            admin_enabled,
        }
    }

    // 로그인 (비밀번호 검증은 사용자 디렉터리가 담당)
    // Direct login; the password check is delegated to the user directory
    pub async fn login(
        &self,
        request: LoginRequest,
        client: &ClientContext,
    ) -> Result<LoginResponse, AuthError> {
        // 1. 입력 검증 (외부 호출 전에)
        let credentials = Self::validate_login(request)?;

        // 2. 사용자 디렉터리에 인증 요청
        let user = self
            .identity
            .authenticate(&credentials)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // 3. 토큰 쌍 발급
        self.issuer.issue(user, client).await
    }

    // OAuth 수동 로그인 (이메일 + 제공자)
    // Manual OAuth login from `{email, provider, name?}`
    pub async fn oauth_login(
        &self,
        request: OAuthRequest,
        client: &ClientContext,
    ) -> Result<LoginResponse, AuthError> {
        let request = Self::validate_oauth(request)?;
        self.login_with_oauth(request, client).await
    }

    /// 제공자 핸드셰이크 결과로 로그인
    /// Login from a completed provider handshake
    pub async fn login_with_assertion(
        &self,
        assertion: OAuthAssertion,
        client: &ClientContext,
    ) -> Result<LoginResponse, AuthError> {
        let request = OAuthLoginRequest::from(assertion);
        if !is_valid_email(&request.email) {
            return Err(AuthError::Validation("Invalid email format".to_string()));
        }
        self.login_with_oauth(request, client).await
    }

    /// 외부 신원을 내부 세션으로 전환
    /// The directory's answer is authoritative; it may create the user on first login.
    async fn login_with_oauth(
        &self,
        request: OAuthLoginRequest,
        client: &ClientContext,
    ) -> Result<LoginResponse, AuthError> {
        let user = self
            .identity
            .resolve_oauth(&request)
            .await?
            .ok_or_else(|| {
                tracing::warn!(provider = request.provider.as_str(), "user directory rejected oauth login");
                AuthError::OAuthLoginFailed
            })?;

        self.issuer.issue(user, client).await
    }

    /// Refresh Token 검증 및 회전 (기존 토큰 무효화 후 새 쌍 발급)
    /// Verify a refresh token end-to-end and rotate it.
    ///
    /// Every verification failure is reported as `InvalidToken`. The old record
    /// is revoked before the new pair is issued; if issuing fails afterwards the
    /// client has to log in again and the old token stays revoked.
    pub async fn refresh(
        &self,
        refresh_token: Option<String>,
        client: &ClientContext,
    ) -> Result<LoginResponse, AuthError> {
        let refresh_token = Self::require_refresh_token(refresh_token)?;

        // 1. 서명 검증
        let claims = self.jwt_service.verify_refresh_token(&refresh_token).map_err(|e| {
            tracing::warn!("refresh rejected: bad signature or claims");
            e
        })?;

        // 2. 저장소 조회 (live 레코드만)
        let record = self.store.find_live(&claims.token_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = claims.user_id, "refresh rejected: no live record");
            AuthError::InvalidToken
        })?;

        // 3. 레코드 소유자와 토큰 subject 일치 확인
        if record.user_id != claims.user_id {
            tracing::warn!(user_id = claims.user_id, "refresh rejected: subject mismatch");
            return Err(AuthError::InvalidToken);
        }

        // 4. 현재 사용자 조회 (장애는 500, 없음은 401)
        let user = self.identity.get_by_id(claims.user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = claims.user_id, "refresh rejected: user no longer exists");
            AuthError::InvalidToken
        })?;

        // 5. 기존 토큰 무효화 - 동시 요청 중 하나만 성공
        let revoked = self.store.revoke(&claims.token_id).await.map_err(|e| {
            tracing::error!(error = %e, user_id = claims.user_id, "failed to revoke rotated refresh token");
            AuthError::from(e)
        })?;
        if !revoked {
            tracing::warn!(user_id = claims.user_id, "refresh rejected: token rotated concurrently");
            return Err(AuthError::InvalidToken);
        }

        // 6. 새 토큰 쌍 발급
        self.issuer.issue(user, client).await
    }

    /// 로그아웃 - Refresh Token 무효화
    /// Logout: revoke one refresh token owned by the authenticated subject
    pub async fn logout(
        &self,
        authenticated_user_id: u64,
        refresh_token: Option<String>,
    ) -> Result<(), AuthError> {
        let refresh_token = Self::require_refresh_token(refresh_token)?;
        let claims = self.verify_owned_refresh_token(authenticated_user_id, &refresh_token)?;

        if !self.store.revoke(&claims.token_id).await? {
            return Err(AuthError::TokenAlreadyRevoked);
        }

        tracing::info!(user_id = claims.user_id, "refresh token revoked on logout");
        Ok(())
    }

    /// 모든 기기에서 로그아웃
    /// Revoke every live refresh token of the subject
    pub async fn logout_all(
        &self,
        authenticated_user_id: u64,
        refresh_token: Option<String>,
    ) -> Result<u64, AuthError> {
        let refresh_token = Self::require_refresh_token(refresh_token)?;
        let claims = self.verify_owned_refresh_token(authenticated_user_id, &refresh_token)?;

        self.revoke_user_tokens(claims.user_id).await
    }

    /// 사용자의 모든 Refresh Token 무효화 (내부 서비스, 관리자)
    /// Bulk revoke for one subject
    pub async fn revoke_user_tokens(&self, user_id: u64) -> Result<u64, AuthError> {
        let count = self.store.revoke_all_for_user(user_id).await.map_err(|e| {
            tracing::error!(error = %e, user_id, "failed to revoke user tokens");
            AuthError::from(e)
        })?;

        tracing::info!(user_id, revoked_count = count, "revoked refresh tokens for user");
        Ok(count)
    }

    /// 전체 Refresh Token 무효화 (운영 환경에서는 비활성화)
    /// System-wide revoke; refused unless administrative operations are enabled
    pub async fn revoke_all_tokens(&self) -> Result<u64, AuthError> {
        if !self.admin_enabled {
            return Err(AuthError::Internal("administrative revocation is disabled".to_string()));
        }

        let count = self.store.revoke_all().await.map_err(|e| {
            tracing::error!(error = %e, "failed to revoke all tokens");
            AuthError::from(e)
        })?;

        tracing::info!(revoked_count = count, "revoked all refresh tokens");
        Ok(count)
    }

    // 로그아웃 경로에서는 잘못된 토큰이 400
    fn verify_owned_refresh_token(
        &self,
        authenticated_user_id: u64,
        refresh_token: &str,
    ) -> Result<RefreshClaims, AuthError> {
        let invalid = || AuthError::Validation("Invalid refresh token".to_string());

        let claims = self
            .jwt_service
            .verify_refresh_token(refresh_token)
            .map_err(|_| invalid())?;

        if claims.user_id != authenticated_user_id {
            tracing::warn!(user_id = authenticated_user_id, "refresh token belongs to another user");
            return Err(invalid());
        }

        Ok(claims)
    }

    fn require_refresh_token(refresh_token: Option<String>) -> Result<String, AuthError> {
        refresh_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| AuthError::Validation("Missing refresh token".to_string()))
    }

    fn validate_login(request: LoginRequest) -> Result<Credentials, AuthError> {
        let (identifier, identifier_type, password) = match (
            non_empty(request.identifier),
            non_empty(request.identifier_type),
            non_empty(request.password),
        ) {
            (Some(i), Some(t), Some(p)) => (i, t, p),
            _ => {
                return Err(AuthError::Validation(
                    "Missing required fields: identifier, identifierType, password".to_string(),
                ))
            }
        };

        let identifier_type = IdentifierType::parse(&identifier_type).ok_or_else(|| {
            AuthError::Validation(
                "Invalid identifierType. Must be email, phone, or username".to_string(),
            )
        })?;

        Ok(Credentials {
            identifier,
            identifier_type,
            password,
        })
    }

    fn validate_oauth(request: OAuthRequest) -> Result<OAuthLoginRequest, AuthError> {
        let (email, provider) = match (non_empty(request.email), non_empty(request.provider)) {
            (Some(e), Some(p)) => (e, p),
            _ => {
                return Err(AuthError::Validation(
                    "Missing required fields: email, provider".to_string(),
                ))
            }
        };

        let provider = OAuthProvider::parse(&provider).ok_or_else(|| {
            AuthError::Validation("Invalid provider. Must be google or facebook".to_string())
        })?;

        if !is_valid_email(&email) {
            return Err(AuthError::Validation("Invalid email format".to_string()));
        }

        Ok(OAuthLoginRequest {
            email,
            provider,
            name: non_empty(request.name),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 기본 이메일 형식 검사: `local@domain.tld`, 공백 없음
/// Basic shape check: one `@`, no whitespace, a dot inside the domain part
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_validate_login_requires_all_fields() {
        let err = AuthService::validate_login(LoginRequest {
            identifier: Some("a@b.com".to_string()),
            identifier_type: None,
            password: Some("secret".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn test_validate_login_rejects_unknown_identifier_type() {
        let err = AuthService::validate_login(LoginRequest {
            identifier: Some("a@b.com".to_string()),
            identifier_type: Some("passport".to_string()),
            password: Some("secret".to_string()),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid identifierType. Must be email, phone, or username");
    }

    #[test]
    fn test_validate_oauth() {
        let ok = AuthService::validate_oauth(OAuthRequest {
            email: Some("a@b.com".to_string()),
            provider: Some("google".to_string()),
            name: Some("  ".to_string()),
        })
        .unwrap();
        assert_eq!(ok.provider, OAuthProvider::Google);
        assert_eq!(ok.name, None);

        let bad_provider = AuthService::validate_oauth(OAuthRequest {
            email: Some("a@b.com".to_string()),
            provider: Some("github".to_string()),
            name: None,
        });
        assert!(matches!(bad_provider, Err(AuthError::Validation(_))));

        let bad_email = AuthService::validate_oauth(OAuthRequest {
            email: Some("not-an-email".to_string()),
            provider: Some("facebook".to_string()),
            name: None,
        });
        assert!(matches!(bad_email, Err(AuthError::Validation(_))));
    }
}
