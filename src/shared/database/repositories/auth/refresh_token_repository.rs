use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use crate::domains::auth::models::refresh_token::{RefreshToken, RefreshTokenCreate};
use crate::shared::database::repositories::auth::RefreshTokenStore;
use crate::shared::errors::StoreError;

/// token id 해싱 (DB 저장용)
/// Hash a token id for storage; the raw id is never written to the database.
pub fn hash_token_id(token_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Refresh Token Repository (PostgreSQL)
/// Refresh Token 데이터베이스 작업 처리
#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    /// Refresh Token 생성 (저장)
    /// token_hash UNIQUE 제약 위반은 StoreError::Conflict
    async fn create(&self, data: RefreshTokenCreate) -> Result<RefreshToken, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens
                (token_hash, user_id, ip_address, user_agent, revoked, expires_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, NOW(), NOW())
            RETURNING user_id, ip_address, user_agent, revoked, expires_at, created_at, updated_at
            "#,
        )
        .bind(hash_token_id(&data.token_id))
        .bind(data.user_id as i64)  // u64 -> i64 변환 (DB는 BIGINT = i64)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(RefreshToken {
            token_id: data.token_id,
            user_id: row.get::<i64, _>("user_id") as u64,
            ip_address: row.get("ip_address"),
            user_agent: row.get("user_agent"),
            revoked: row.get("revoked"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Refresh Token 조회 (live 레코드만)
    /// Find a live refresh token by id
    async fn find_live(&self, token_id: &str) -> Result<Option<RefreshToken>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, ip_address, user_agent, revoked, expires_at, created_at, updated_at
            FROM refresh_tokens
            WHERE token_hash = $1 AND revoked = FALSE AND expires_at > NOW()
            "#,
        )
        .bind(hash_token_id(token_id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| RefreshToken {
            token_id: token_id.to_string(),
            user_id: row.get::<i64, _>("user_id") as u64,
            ip_address: row.get("ip_address"),
            user_agent: row.get("user_agent"),
            revoked: row.get("revoked"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// Refresh Token 무효화 (revoked = true)
    /// 조건부 UPDATE 한 번으로 처리하므로 동시 요청 중 하나만 true를 받음
    async fn revoke(&self, token_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE, updated_at = NOW()
            WHERE token_hash = $1 AND revoked = FALSE AND expires_at > NOW()
            "#,
        )
        .bind(hash_token_id(token_id))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// 사용자의 모든 Refresh Token 무효화
    /// Revoke all live refresh tokens for a user
    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE, updated_at = NOW()
            WHERE user_id = $1 AND revoked = FALSE AND expires_at > NOW()
            "#,
        )
        .bind(user_id as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn revoke_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE, updated_at = NOW()
            WHERE revoked = FALSE AND expires_at > NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// 만료된 토큰 삭제 (정리 작업)
    /// Delete expired tokens (cleanup)
    async fn cleanup_expired(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// 무효화된 토큰 삭제 (정리 작업)
    /// Delete revoked tokens (cleanup)
    async fn cleanup_revoked(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE revoked = TRUE
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
