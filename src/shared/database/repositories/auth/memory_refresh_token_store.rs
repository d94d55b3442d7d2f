use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use crate::domains::auth::models::refresh_token::{RefreshToken, RefreshTokenCreate};
use crate::shared::database::repositories::auth::RefreshTokenStore;
use crate::shared::errors::StoreError;

/// 인메모리 Refresh Token 저장소
/// In-process refresh token store for tests and local runs without Postgres.
///
/// Each operation holds the lock for its whole read-modify-write, which gives
/// the same single-record atomicity the Postgres conditional UPDATE does.
#[derive(Clone, Default)]
pub struct MemoryRefreshTokenStore {
    records: Arc<Mutex<HashMap<String, RefreshToken>>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 레코드 수 (정리 작업 확인용)
    /// Number of stored records, live or not
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// 상태와 관계없이 레코드 조회
    /// Fetch a record regardless of its state
    pub fn get(&self, token_id: &str) -> Option<RefreshToken> {
        self.records.lock().get(token_id).cloned()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken, StoreError> {
        let mut records = self.records.lock();
        if records.contains_key(&data.token_id) {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let record = RefreshToken {
            token_id: data.token_id.clone(),
            user_id: data.user_id,
            ip_address: data.ip_address,
            user_agent: data.user_agent,
            revoked: false,
            expires_at: data.expires_at,
            created_at: now,
            updated_at: now,
        };
        records.insert(data.token_id, record.clone());
        Ok(record)
    }

    async fn find_live(&self, token_id: &str) -> Result<Option<RefreshToken>, StoreError> {
        let now = Utc::now();
        Ok(self
            .records
            .lock()
            .get(token_id)
            .filter(|record| record.is_live_at(now))
            .cloned())
    }

    async fn revoke(&self, token_id: &str) -> Result<bool, StoreError> {
        let now = Utc::now();
        let mut records = self.records.lock();
        match records.get_mut(token_id) {
            Some(record) if record.is_live_at(now) => {
                record.revoked = true;
                record.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut count = 0;
        for record in self.records.lock().values_mut() {
            if record.user_id == user_id && record.is_live_at(now) {
                record.revoked = true;
                record.updated_at = now;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn revoke_all(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut count = 0;
        for record in self.records.lock().values_mut() {
            if record.is_live_at(now) {
                record.revoked = true;
                record.updated_at = now;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn cleanup_expired(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| record.expires_at > now);
        Ok((before - records.len()) as u64)
    }

    async fn cleanup_revoked(&self) -> Result<u64, StoreError> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| !record.revoked);
        Ok((before - records.len()) as u64)
    }
}
