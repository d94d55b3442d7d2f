use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 디렉터리가 반환하는 사용자
/// Canonical user as returned by the user directory. Read-only here and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// 응답용 사용자 정보 (최소 필드)
/// Minimal user projection returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    #[schema(example = 7)]
    pub id: u64,
    #[schema(example = "a@b.com")]
    pub email: String,
    #[schema(example = "abee")]
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}
