use std::time::Duration;
use sqlx::postgres::{PgPool, PgPoolOptions};
use anyhow::{Context, Result};

// 요청마다 refresh_tokens 조회/갱신이 일어나므로 풀 크기를 명시
const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Refresh Token 저장소용 PostgreSQL 연결 풀
/// Postgres pool backing the refresh token store
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    // 연결 풀 생성 (연결 실패 시 시작 중단)
    pub async fn new(db_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(db_url)
            .await
            .context("Failed to connect to token store database")?;

        tracing::info!(max_connections = MAX_CONNECTIONS, "database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // refresh_tokens 테이블/인덱스 마이그레이션
    // Apply migrations/ (refresh_tokens table and its indexes)
    pub async fn initialize(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run refresh token migrations")?;

        tracing::info!("database migrations completed");
        Ok(())
    }
}
