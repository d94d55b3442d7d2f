use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domains::auth::models::user::UserResponse;

/// 로그인 식별자 종류
/// Kind of identifier used for direct login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    Email,
    Phone,
    Username,
}

impl IdentifierType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "username" => Some(Self::Username),
            _ => None,
        }
    }
}

/// 요청 클라이언트 정보 (Refresh Token 레코드에 기록)
/// Client context recorded on every refresh token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientContext {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent: user_agent.into(),
        }
    }
}

// 로그인 요청 모델
// Fields are optional so that missing values surface as 400, not as a JSON rejection.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    /// Email, phone or username
    /// 이메일, 전화번호 또는 사용자명
    #[schema(example = "a@b.com")]
    #[serde(default)]
    pub identifier: Option<String>,

    /// One of `email`, `phone`, `username`
    #[schema(example = "email")]
    #[serde(default)]
    pub identifier_type: Option<String>,

    /// Password (verified by the user directory)
    /// 비밀번호 (사용자 디렉터리에서 검증)
    #[schema(example = "secret")]
    #[serde(default)]
    pub password: Option<String>,
}

/// 검증된 로그인 요청
/// Login credentials after field validation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub identifier: String,
    pub identifier_type: IdentifierType,
    pub password: String,
}

// OAuth 수동 로그인 요청 모델
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = OAuthRequest)]
pub struct OAuthRequest {
    #[schema(example = "a@b.com")]
    #[serde(default)]
    pub email: Option<String>,

    /// `google` or `facebook`
    #[schema(example = "google")]
    #[serde(default)]
    pub provider: Option<String>,

    #[schema(example = "Abee")]
    #[serde(default)]
    pub name: Option<String>,
}

// 토큰 쌍 응답 모델 (로그인, OAuth, 갱신 공통)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = LoginResponse)]
pub struct LoginResponse {
    /// JWT Access Token (짧은 수명)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,

    /// JWT Refresh Token (긴 수명, 저장소 레코드로 검증)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,

    pub user: UserResponse,
}

// 토큰 갱신 / 로그아웃 요청 모델
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = RefreshTokenRequest)]
pub struct RefreshTokenRequest {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// 로그아웃 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = MessageResponse)]
pub struct MessageResponse {
    pub message: String,
}

// 일괄 무효화 응답 모델
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = RevokedCountResponse)]
pub struct RevokedCountResponse {
    pub message: String,
    pub revoked_count: u64,
}

// 내부 서비스 요청 모델
// `subjectId` must be a positive integer; anything else is a 400.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = RevokeSubjectRequest)]
pub struct RevokeSubjectRequest {
    #[schema(value_type = u64, example = 7)]
    #[serde(default, alias = "userId")]
    pub subject_id: Option<serde_json::Value>,
}
