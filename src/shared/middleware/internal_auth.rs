use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use crate::shared::services::AppState;
use crate::shared::errors::AuthError;

pub const INTERNAL_API_KEY_HEADER: &str = "x-internal-api-key";

/// 서비스 간 호출 인증 (공유 API 키)
/// Proof that the caller presented the shared service-to-service key
#[derive(Debug, Clone, Copy)]
pub struct InternalCaller;

#[async_trait]
impl FromRequestParts<AppState> for InternalCaller {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(INTERNAL_API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::InvalidApiKey)?;

        if !constant_time_eq(presented.as_bytes(), state.config.internal_api_key.as_bytes()) {
            tracing::warn!("internal call rejected: bad api key");
            return Err(AuthError::InvalidApiKey.into());
        }

        Ok(InternalCaller)
    }
}

/// 상수 시간 비교
/// Compare without short-circuiting on the first differing byte
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
