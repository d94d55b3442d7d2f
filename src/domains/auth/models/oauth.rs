use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 지원하는 OAuth 제공자
/// Supported OAuth providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Facebook,
}

impl OAuthProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "google" => Some(Self::Google),
            "facebook" => Some(Self::Facebook),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
        }
    }
}

/// 제공자가 돌려준 프로필 정보
/// Profile fields delivered by a completed provider handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    pub access_token: String,
}

/// OAuth 핸드셰이크 결과 (제공자별 태그)
/// Result of a completed provider handshake, tagged by provider.
/// Distinct from a bearer session subject; it must be converted into an
/// [`OAuthLoginRequest`] and resolved by the user directory before a session exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum OAuthAssertion {
    Google(ProviderProfile),
    Facebook(ProviderProfile),
}

impl OAuthAssertion {
    pub fn provider(&self) -> OAuthProvider {
        match self {
            OAuthAssertion::Google(_) => OAuthProvider::Google,
            OAuthAssertion::Facebook(_) => OAuthProvider::Facebook,
        }
    }
}

/// 제공자 독립적인 OAuth 로그인 요청 (사용자 디렉터리로 전달)
/// Provider-agnostic OAuth login, forwarded to the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthLoginRequest {
    pub email: String,
    pub provider: OAuthProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<OAuthAssertion> for OAuthLoginRequest {
    fn from(assertion: OAuthAssertion) -> Self {
        // provider access tokens never leave this process
        match assertion {
            OAuthAssertion::Google(profile) => Self {
                email: profile.email,
                provider: OAuthProvider::Google,
                name: profile.name,
            },
            OAuthAssertion::Facebook(profile) => Self {
                email: profile.email,
                provider: OAuthProvider::Facebook,
                name: profile.name,
            },
        }
    }
}
