// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 인메모리 저장소와 스크립트된 사용자 디렉터리로 AppState 구성
// (PostgreSQL, 네트워크 없이 실행)
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let ctx = setup();
//     // 테스트 코드...
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use auth_gateway::domains::auth::models::{
    ClientContext, Credentials, LoginRequest, OAuthLoginRequest, User,
};
use auth_gateway::shared::clients::IdentityBridge;
use auth_gateway::shared::config::{Config, DeploymentMode, JwtConfig, OAuthProviderConfig};
use auth_gateway::shared::database::MemoryRefreshTokenStore;
use auth_gateway::shared::errors::BridgeError;
use auth_gateway::shared::services::AppState;

// 테스트용 상수
pub const TEST_EMAIL: &str = "a@b.com";
pub const TEST_PASSWORD: &str = "secret";
pub const TEST_USER_ID: u64 = 7;
pub const TEST_USERNAME: &str = "abee";
pub const OTHER_USER_ID: u64 = 8;
pub const INTERNAL_KEY: &str = "internal-test-key";

/// 테스트 설정 (환경 변수 없이)
pub fn test_config(mode: DeploymentMode) -> Config {
    let provider = |name: &str| OAuthProviderConfig {
        client_id: format!("{}-client", name),
        client_secret: format!("{}-secret", name),
        callback_url: format!("http://localhost/auth/{}/callback", name),
    };

    Config {
        port: 0,
        mode,
        database_url: "postgresql://unused".to_string(),
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        },
        user_api_url: "http://localhost:0".to_string(),
        user_api_timeout: Duration::from_secs(1),
        internal_api_key: INTERNAL_KEY.to_string(),
        google: provider("google"),
        facebook: provider("facebook"),
        cors_origin: None,
        cleanup_interval: Duration::from_secs(3600),
    }
}

/// 스크립트된 사용자 디렉터리
/// In-process user directory with scripted answers
#[derive(Default)]
pub struct ScriptedDirectory {
    users: Mutex<HashMap<u64, User>>,
    passwords: Mutex<HashMap<String, (String, u64)>>,
    next_id: AtomicUsize,
    unavailable: AtomicBool,
    reject_oauth: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        let directory = Self {
            next_id: AtomicUsize::new(100),
            ..Self::default()
        };
        directory.add_user(user(TEST_USER_ID, TEST_EMAIL, TEST_USERNAME), TEST_PASSWORD);
        directory.add_user(user(OTHER_USER_ID, "other@b.com", "other"), "other-secret");
        directory
    }

    pub fn add_user(&self, user: User, password: &str) {
        self.passwords
            .lock()
            .insert(user.email.clone(), (password.to_string(), user.id));
        self.users.lock().insert(user.id, user);
    }

    pub fn remove_user(&self, user_id: u64) {
        self.users.lock().remove(&user_id);
    }

    /// 전송 장애 흉내 (타임아웃, 연결 실패)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_reject_oauth(&self, reject: bool) {
        self.reject_oauth.store(reject, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BridgeError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityBridge for ScriptedDirectory {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<User>, BridgeError> {
        self.enter()?;

        let user_id = match self.passwords.lock().get(&credentials.identifier) {
            Some((password, id)) if *password == credentials.password => *id,
            _ => return Ok(None),
        };
        Ok(self.users.lock().get(&user_id).cloned())
    }

    async fn resolve_oauth(&self, request: &OAuthLoginRequest) -> Result<Option<User>, BridgeError> {
        self.enter()?;
        if self.reject_oauth.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let mut users = self.users.lock();
        if let Some(existing) = users.values().find(|u| u.email == request.email) {
            return Ok(Some(existing.clone()));
        }

        // 첫 OAuth 로그인: 디렉터리가 사용자 생성
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
        let username = request
            .name
            .clone()
            .unwrap_or_else(|| request.email.split('@').next().unwrap_or_default().to_string());
        let mut created = user(id, &request.email, &username);
        created.provider = Some(request.provider.as_str().to_string());
        users.insert(id, created.clone());
        Ok(Some(created))
    }

    async fn get_by_id(&self, user_id: u64) -> Result<Option<User>, BridgeError> {
        self.enter()?;
        Ok(self.users.lock().get(&user_id).cloned())
    }
}

pub fn user(id: u64, email: &str, username: &str) -> User {
    User {
        id,
        email: email.to_string(),
        username: username.to_string(),
        phone: None,
        provider: None,
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: MemoryRefreshTokenStore,
    pub directory: Arc<ScriptedDirectory>,
}

/// 테스트 모드 AppState (관리자 기능 활성)
pub fn setup() -> TestContext {
    setup_with_mode(DeploymentMode::Test)
}

pub fn setup_with_mode(mode: DeploymentMode) -> TestContext {
    let store = MemoryRefreshTokenStore::new();
    let directory = Arc::new(ScriptedDirectory::new());
    let state = AppState::with_components(
        test_config(mode),
        Arc::new(store.clone()),
        directory.clone(),
    );

    TestContext {
        state,
        store,
        directory,
    }
}

pub fn client() -> ClientContext {
    ClientContext::new("10.0.0.1", "integration-test")
}

pub fn login_request(identifier: &str, identifier_type: &str, password: &str) -> LoginRequest {
    LoginRequest {
        identifier: Some(identifier.to_string()),
        identifier_type: Some(identifier_type.to_string()),
        password: Some(password.to_string()),
    }
}

pub fn valid_login() -> LoginRequest {
    login_request(TEST_EMAIL, "email", TEST_PASSWORD)
}
