use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use crate::shared::database::RefreshTokenStore;
use crate::shared::errors::StoreError;

/// Refresh Token 정리 스케줄러
/// Refresh token cleanup scheduler
///
/// 역할:
/// - 주기적으로 만료된 레코드와 무효화된 레코드를 삭제
/// - 활성화/비활성화 제어 가능
///
/// Only records already excluded from `find_live` are removed, so the task can
/// run alongside every request path without coordination.
#[derive(Clone)]
pub struct TokenCleanupScheduler {
    store: Arc<dyn RefreshTokenStore>,
    period: Duration,
    enabled: Arc<AtomicBool>,
}

/// 한 번의 정리 결과
/// Result of one cleanup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupReport {
    pub expired: u64,
    pub revoked: u64,
}

impl TokenCleanupScheduler {
    /// 새 스케줄러 생성
    /// Create new scheduler
    pub fn new(store: Arc<dyn RefreshTokenStore>, period: Duration) -> Self {
        Self {
            store,
            period,
            enabled: Arc::new(AtomicBool::new(true)), // 기본값: 활성화
        }
    }

    /// 스케줄러 시작
    /// Start the background task. The first pass runs after one full period.
    pub fn start(&self) -> JoinHandle<()> {
        let scheduler = self.clone();

        tokio::spawn(async move {
            let mut ticker = interval(scheduler.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await; // 첫 tick은 즉시 반환

            loop {
                ticker.tick().await;

                if !scheduler.is_enabled() {
                    continue;
                }

                match scheduler.run_once().await {
                    Ok(report) => tracing::info!(
                        expired = report.expired,
                        revoked = report.revoked,
                        "refresh token cleanup finished"
                    ),
                    Err(e) => tracing::error!(error = %e, "refresh token cleanup failed"),
                }
            }
        })
    }

    /// 정리 작업 1회 실행
    /// Run one cleanup pass: expired records first, then revoked ones
    pub async fn run_once(&self) -> Result<CleanupReport, StoreError> {
        let expired = self.store.cleanup_expired().await?;
        let revoked = self.store.cleanup_revoked().await?;
        tracing::debug!(expired, revoked, "cleanup pass");

        Ok(CleanupReport { expired, revoked })
    }

    /// 스케줄러 활성화
    /// Enable scheduler
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// 스케줄러 비활성화
    /// Disable scheduler
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// 스케줄러 상태 조회
    /// Get scheduler status
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
