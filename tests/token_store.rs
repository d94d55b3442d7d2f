// =====================================================
// Refresh Token 저장소 통합 테스트
// =====================================================

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use auth_gateway::domains::auth::models::RefreshTokenCreate;
use auth_gateway::domains::auth::services::{CleanupReport, TokenCleanupScheduler};
use auth_gateway::shared::database::{MemoryRefreshTokenStore, RefreshTokenStore};
use auth_gateway::shared::errors::StoreError;

fn record(user_id: u64, token_id: &str, ttl_secs: i64) -> RefreshTokenCreate {
    RefreshTokenCreate {
        user_id,
        token_id: token_id.to_string(),
        ip_address: "10.0.0.1".to_string(),
        user_agent: "integration-test".to_string(),
        expires_at: Utc::now() + chrono::Duration::seconds(ttl_secs),
    }
}

/// 테스트: 생성 직후 live 조회
#[tokio::test]
async fn test_create_then_find_live() {
    let store = MemoryRefreshTokenStore::new();

    let created = store.create(record(7, "token-a", 3600)).await.unwrap();
    assert!(!created.revoked);
    assert_eq!(created.created_at, created.updated_at);

    let found = store.find_live("token-a").await.unwrap().expect("record should be live");
    assert_eq!(found.user_id, 7);
    assert_eq!(found.ip_address, "10.0.0.1");
    assert_eq!(found.user_agent, "integration-test");

    assert!(store.find_live("token-unknown").await.unwrap().is_none());
}

/// 테스트: 중복 token id 는 Conflict
#[tokio::test]
async fn test_duplicate_token_id_conflicts() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "token-a", 3600)).await.unwrap();

    let err = store.create(record(8, "token-a", 3600)).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict));

    // 기존 레코드는 그대로
    assert_eq!(store.find_live("token-a").await.unwrap().unwrap().user_id, 7);
    assert_eq!(store.len(), 1);
}

/// 테스트: revoke 는 멱등 (true -> false)
#[tokio::test]
async fn test_revoke_is_idempotent() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "token-a", 3600)).await.unwrap();

    assert!(store.revoke("token-a").await.unwrap());
    assert!(store.find_live("token-a").await.unwrap().is_none());

    assert!(!store.revoke("token-a").await.unwrap());
    assert!(store.find_live("token-a").await.unwrap().is_none());

    // 레코드는 삭제되지 않고 revoked 로 남음
    let kept = store.get("token-a").expect("revoke never deletes");
    assert!(kept.revoked);
    assert!(kept.updated_at >= kept.created_at);

    assert!(!store.revoke("token-unknown").await.unwrap());
}

/// 테스트: 만료된 레코드는 live 가 아니고 revoke 도 불가
#[tokio::test]
async fn test_expired_record_is_not_live() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "token-old", -1)).await.unwrap();

    assert!(store.find_live("token-old").await.unwrap().is_none());
    assert!(!store.revoke("token-old").await.unwrap());
    assert!(!store.get("token-old").unwrap().revoked);
}

/// 테스트: 사용자별 일괄 무효화는 해당 사용자의 live 레코드만 센다
#[tokio::test]
async fn test_revoke_all_for_user_counts_live_records_only() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "a1", 3600)).await.unwrap();
    store.create(record(7, "a2", 3600)).await.unwrap();
    store.create(record(7, "a3", 3600)).await.unwrap();
    store.create(record(7, "a-expired", -1)).await.unwrap();
    store.create(record(8, "b1", 3600)).await.unwrap();
    store.revoke("a3").await.unwrap();

    assert_eq!(store.revoke_all_for_user(7).await.unwrap(), 2);
    assert!(store.find_live("a1").await.unwrap().is_none());
    assert!(store.find_live("a2").await.unwrap().is_none());
    assert!(store.find_live("b1").await.unwrap().is_some());

    // 두 번째 호출은 0
    assert_eq!(store.revoke_all_for_user(7).await.unwrap(), 0);
    assert_eq!(store.revoke_all_for_user(999).await.unwrap(), 0);
}

/// 테스트: 전체 무효화
#[tokio::test]
async fn test_revoke_all() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "a1", 3600)).await.unwrap();
    store.create(record(8, "b1", 3600)).await.unwrap();
    store.create(record(9, "c-expired", -1)).await.unwrap();

    assert_eq!(store.revoke_all().await.unwrap(), 2);
    assert!(store.find_live("a1").await.unwrap().is_none());
    assert!(store.find_live("b1").await.unwrap().is_none());
    assert_eq!(store.revoke_all().await.unwrap(), 0);
}

/// 테스트: 정리 작업은 live 가 아닌 레코드만 삭제
#[tokio::test]
async fn test_cleanup_removes_only_dead_records() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "live", 3600)).await.unwrap();
    store.create(record(7, "expired-1", -10)).await.unwrap();
    store.create(record(8, "expired-2", -1)).await.unwrap();
    store.create(record(8, "revoked", 3600)).await.unwrap();
    store.revoke("revoked").await.unwrap();

    assert_eq!(store.cleanup_expired().await.unwrap(), 2);
    assert_eq!(store.cleanup_revoked().await.unwrap(), 1);
    assert_eq!(store.len(), 1);
    assert!(store.find_live("live").await.unwrap().is_some());

    assert_eq!(store.cleanup_expired().await.unwrap(), 0);
    assert_eq!(store.cleanup_revoked().await.unwrap(), 0);
}

/// 테스트: 동시에 같은 토큰을 revoke 하면 하나만 true
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_revoke_has_single_winner() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "contended", 3600)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move { store.revoke("contended").await.unwrap() }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

/// 테스트: 스케줄러 1회 실행 결과
#[tokio::test]
async fn test_cleanup_scheduler_run_once() {
    let store = MemoryRefreshTokenStore::new();
    store.create(record(7, "live", 3600)).await.unwrap();
    store.create(record(7, "expired", -1)).await.unwrap();
    store.create(record(7, "revoked", 3600)).await.unwrap();
    store.revoke("revoked").await.unwrap();

    let scheduler = TokenCleanupScheduler::new(Arc::new(store.clone()), Duration::from_secs(60));
    let report = scheduler.run_once().await.unwrap();

    assert_eq!(report, CleanupReport { expired: 1, revoked: 1 });
    assert_eq!(store.len(), 1);
}

/// 테스트: 백그라운드 스케줄러는 주기마다 실행되고 비활성화 시 건너뜀
#[tokio::test(start_paused = true)]
async fn test_cleanup_scheduler_background_task() {
    let store = MemoryRefreshTokenStore::new();
    let scheduler = TokenCleanupScheduler::new(Arc::new(store.clone()), Duration::from_secs(60));
    assert!(scheduler.is_enabled());

    scheduler.disable();
    let handle = scheduler.start();

    store.create(record(7, "revoked", 3600)).await.unwrap();
    store.revoke("revoked").await.unwrap();

    // 비활성화 상태: 주기가 지나도 삭제되지 않음
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(store.len(), 1);

    scheduler.enable();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(store.is_empty());

    handle.abort();
}
