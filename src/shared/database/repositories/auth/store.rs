use async_trait::async_trait;
use crate::domains::auth::models::refresh_token::{RefreshToken, RefreshTokenCreate};
use crate::shared::errors::StoreError;

/// Refresh Token 저장소 인터페이스
/// Refresh token store.
///
/// Every mutating call is a single atomic write in the backing store; callers
/// coordinate through these writes, never through in-process locks. Only
/// `revoke*` may change an existing record, and only its revocation state.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// 새 레코드 생성. token id 충돌 시 `StoreError::Conflict`
    /// Insert a new live record. A colliding `token_id` yields `StoreError::Conflict`.
    async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken, StoreError>;

    /// 유효한(무효화되지 않고 만료되지 않은) 레코드만 반환
    /// Return the record only if it is live.
    async fn find_live(&self, token_id: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// 멱등 무효화. 실제로 live 레코드를 뒤집었을 때만 true
    /// Idempotent revoke; `true` only when a live record was flipped by this call.
    async fn revoke(&self, token_id: &str) -> Result<bool, StoreError>;

    /// 사용자의 모든 live 토큰 무효화
    /// Flip every live record of one subject ("log out everywhere").
    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError>;

    /// 전체 live 토큰 무효화 (관리용)
    /// Flip every live record system-wide.
    async fn revoke_all(&self) -> Result<u64, StoreError>;

    /// 만료된 레코드 삭제
    /// Physically delete records whose expiry has passed.
    async fn cleanup_expired(&self) -> Result<u64, StoreError>;

    /// 무효화된 레코드 삭제
    /// Physically delete revoked records.
    async fn cleanup_revoked(&self) -> Result<u64, StoreError>;
}
