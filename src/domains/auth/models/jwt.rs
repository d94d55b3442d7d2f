use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Access Token Claims
/// 최소 클레임: 사용자 ID + 시간 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// 사용자 ID
    /// User ID
    pub user_id: u64,

    /// 만료 시간 (Unix timestamp)
    pub exp: i64,

    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
}

impl AccessClaims {
    /// 만료 시각이 i64 범위를 넘으면 None
    pub fn new(user_id: u64, ttl: Duration) -> Option<Self> {
        let (iat, exp) = issued_window(ttl)?;
        Some(Self { user_id, exp, iat })
    }
}

/// Refresh Token Claims
/// token_id는 저장소 레코드의 키
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub user_id: u64,
    pub token_id: String,
    pub exp: i64,
    pub iat: i64,
}

impl RefreshClaims {
    pub fn new(user_id: u64, token_id: String, ttl: Duration) -> Option<Self> {
        let (iat, exp) = issued_window(ttl)?;
        Some(Self { user_id, token_id, exp, iat })
    }
}

// (iat, exp) = (now, now + ttl), overflow 시 None
fn issued_window(ttl: Duration) -> Option<(i64, i64)> {
    let now = chrono::Utc::now().timestamp();
    let exp = now.checked_add(i64::try_from(ttl.as_secs()).ok()?)?;
    Some((now, exp))
}
