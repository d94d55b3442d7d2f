use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use crate::shared::errors::{BridgeError, StoreError};

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 요청 형식 오류 (스토어/업스트림 호출 전에 반환)
    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// 잘못된 로그인 정보
    /// Invalid identifier or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 잘못된 또는 만료된 토큰
    /// Invalid, expired, revoked or unknown token. The message is the same for every cause.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Token not provided")]
    MissingToken,

    /// 이미 무효화된 토큰으로 로그아웃
    /// Logout with a token that is already revoked or unknown
    #[error("Token already revoked or invalid")]
    TokenAlreadyRevoked,

    /// OAuth 사용자 처리 실패
    /// Directory could not resolve the OAuth identity
    #[error("Failed to process OAuth login")]
    OAuthLoginFailed,

    /// 내부 API 키 오류
    /// Missing or wrong service-to-service key
    #[error("Invalid internal API key")]
    InvalidApiKey,

    /// token id 충돌
    /// Refresh token id collision
    #[error("Refresh token id conflict")]
    TokenConflict,

    /// 사용자 디렉터리 장애
    /// User directory unreachable or erroring
    #[error("User directory unavailable: {0}")]
    UpstreamUnavailable(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_)
            | AuthError::TokenAlreadyRevoked
            | AuthError::OAuthLoginFailed => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::MissingToken
            | AuthError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AuthError::TokenConflict
            | AuthError::UpstreamUnavailable(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthError::TokenConflict,
            StoreError::Database(msg) => AuthError::DatabaseError(msg),
        }
    }
}

impl From<BridgeError> for AuthError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Unavailable(msg) => AuthError::UpstreamUnavailable(msg),
        }
    }
}

/// AuthError를 HTTP 응답으로 변환
/// 500 응답은 내부 정보를 노출하지 않음
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let status = err.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        (status, Json(json!({ "error": message })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_share_one_message() {
        let (status, Json(body)) = <(StatusCode, Json<serde_json::Value>)>::from(AuthError::InvalidToken);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let (status, Json(body)) = <(StatusCode, Json<serde_json::Value>)>::from(
            AuthError::UpstreamUnavailable("connection refused to 10.0.0.3".to_string()),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_store_conflict_maps_to_token_conflict() {
        let err: AuthError = StoreError::Conflict.into();
        assert!(matches!(err, AuthError::TokenConflict));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
