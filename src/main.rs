use std::net::SocketAddr;
use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth_gateway::routes::create_router;
use auth_gateway::shared::config::Config;
use auth_gateway::shared::database::Database;
use auth_gateway::shared::services::AppState;

// Import models for OpenAPI schema
use auth_gateway::domains::auth::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_gateway::domains::auth::handlers::health_handler::health,
        auth_gateway::domains::auth::handlers::auth_handler::login,
        auth_gateway::domains::auth::handlers::auth_handler::oauth,
        auth_gateway::domains::auth::handlers::auth_handler::refresh,
        auth_gateway::domains::auth::handlers::auth_handler::logout,
        auth_gateway::domains::auth::handlers::auth_handler::logout_all,
        auth_gateway::domains::auth::handlers::internal_handler::revoke_user_tokens,
        auth_gateway::domains::auth::handlers::admin_handler::revoke_all_tokens,
        auth_gateway::domains::auth::handlers::admin_handler::revoke_user_tokens
    ),
    components(schemas(
        IdentifierType,
        OAuthProvider,
        LoginRequest,
        OAuthRequest,
        LoginResponse,
        RefreshTokenRequest,
        MessageResponse,
        RevokedCountResponse,
        RevokeSubjectRequest,
        UserResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Login, OAuth login, token refresh and logout"),
        (name = "Internal", description = "Service-to-service endpoints (x-internal-api-key)"),
        (name = "Admin", description = "Token administration (non-production only)"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Auth Gateway",
        description = "Issues and verifies session tokens and manages refresh token lifecycle",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "InternalApiKey",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("x-internal-api-key"),
                    ),
                ),
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로딩: 누락 시 소켓을 열기 전에 종료
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(mode = ?config.mode, "configuration loaded");

    // DB 연결
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    db.initialize()
        .await
        .context("Failed to initialize database")?;

    let port = config.port;
    let mode = config.mode;
    let cors = cors_layer(config.cors_origin.as_deref())?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(config, db).context("Failed to initialize AppState")?;

    // 만료/무효화 토큰 정리 작업
    let _cleanup = app_state.auth_state.cleanup_scheduler.start();

    // Router 생성
    let app = Router::new()
        .merge(create_router(mode))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port)))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    tracing::info!("Server running on http://localhost:{}", port);
    tracing::info!("Swagger UI available at http://localhost:{}/docs", port);

    // 서버 실행 (Ctrl-C 시 종료)
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

// CORS 설정: CORS_ORIGIN 이 없으면 모든 origin 허용
fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = origin
        .parse::<HeaderValue>()
        .context("CORS_ORIGIN is not a valid header value")?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::HeaderName::from_static("x-internal-api-key"),
        ])
        .allow_credentials(true))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
