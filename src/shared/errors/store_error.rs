use thiserror::Error;

/// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// 토큰 저장소 에러
/// Refresh token store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// token id 충돌 (같은 id로 재시도 금지)
    /// token id collided with an existing record; the caller must generate a new id
    #[error("Refresh token id already exists")]
    Conflict,

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Conflict;
            }
        }
        StoreError::Database(err.to_string())
    }
}
