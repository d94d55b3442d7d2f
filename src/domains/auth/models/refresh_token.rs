use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Refresh Token 레코드 (저장소 소유)
/// Refresh token record. Only `revoked`/`updated_at` ever change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token_id: String,
    pub user_id: u64,
    pub ip_address: String,
    pub user_agent: String,
    pub revoked: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshToken {
    /// 무효화되지 않았고 만료되지 않은 레코드
    /// Live means not revoked and not yet expired
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}

/// Refresh Token 생성 요청
/// Refresh token creation request
#[derive(Debug, Clone)]
pub struct RefreshTokenCreate {
    pub user_id: u64,
    pub token_id: String,
    pub ip_address: String,
    pub user_agent: String,
    pub expires_at: DateTime<Utc>,
}
