// Shared module
// 하위 모듈 경로로 직접 참조 (database::auth 와 middleware::auth 이름 충돌 방지)
pub mod clients;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
