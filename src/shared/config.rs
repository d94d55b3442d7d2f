use std::time::Duration;
use thiserror::Error;

/// 설정 로딩 에러
/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

/// 배포 모드 (RUST_ENV)
/// Deployment mode. Administrative routes are only mounted outside production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Development,
    Production,
    Test,
}

impl DeploymentMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// 토큰 서명 설정
/// Signing secrets and lifetimes for the two credential kinds
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// OAuth 제공자 자격 증명
/// Client credentials for one OAuth provider
#[derive(Debug, Clone)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

/// 애플리케이션 설정 (환경 변수)
/// Application configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mode: DeploymentMode,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub user_api_url: String,
    pub user_api_timeout: Duration,
    pub internal_api_key: String,
    pub google: OAuthProviderConfig,
    pub facebook: OAuthProviderConfig,
    pub cors_origin: Option<String>,
    pub cleanup_interval: Duration,
}

impl Config {
    /// 환경 변수에서 설정 읽기
    /// Load configuration from environment variables. Any missing required value is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = optional("AUTH_PORT")
            .unwrap_or_else(|| "3002".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("AUTH_PORT"))?;

        let mode = DeploymentMode::parse(&required("RUST_ENV")?)
            .ok_or(ConfigError::Invalid("RUST_ENV"))?;

        let access_secret = required("JWT_SECRET")?;
        let refresh_secret = required("JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid("JWT_REFRESH_SECRET must differ from JWT_SECRET"));
        }

        let access_ttl = parse_duration(&required("JWT_EXPIRES_IN")?)
            .ok_or(ConfigError::Invalid("JWT_EXPIRES_IN"))?;
        let refresh_ttl = parse_duration(&required("JWT_REFRESH_EXPIRES_IN")?)
            .ok_or(ConfigError::Invalid("JWT_REFRESH_EXPIRES_IN"))?;

        let user_api_timeout_secs: u64 = optional("USER_API_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("USER_API_TIMEOUT_SECS"))?;

        let cleanup_interval_secs: u64 = optional("TOKEN_CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_CLEANUP_INTERVAL_SECS"))?;
        if cleanup_interval_secs == 0 {
            return Err(ConfigError::Invalid("TOKEN_CLEANUP_INTERVAL_SECS"));
        }

        Ok(Self {
            port,
            mode,
            database_url: required("DATABASE_URL")?,
            jwt: JwtConfig {
                access_secret,
                refresh_secret,
                access_ttl,
                refresh_ttl,
            },
            user_api_url: required("USER_API_URL")?,
            user_api_timeout: Duration::from_secs(user_api_timeout_secs),
            internal_api_key: required("INTERNAL_API_KEY")?,
            google: OAuthProviderConfig {
                client_id: required("GOOGLE_CLIENT_ID")?,
                client_secret: required("GOOGLE_CLIENT_SECRET")?,
                callback_url: required("GOOGLE_CALLBACK_URL")?,
            },
            facebook: OAuthProviderConfig {
                client_id: required("FACEBOOK_APP_ID")?,
                client_secret: required("FACEBOOK_APP_SECRET")?,
                callback_url: required("FACEBOOK_CALLBACK_URL")?,
            },
            cors_origin: optional("CORS_ORIGIN"),
            cleanup_interval: Duration::from_secs(cleanup_interval_secs),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// 토큰 수명 상한 (10년)
pub const MAX_DURATION_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// 기간 문자열 파싱
/// Parse `"900"`, `"30s"`, `"15m"`, `"12h"` or `"7d"`. Zero and anything above
/// [`MAX_DURATION_SECS`] are rejected.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (digits, multiplier) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 60 * 60),
        'd' => (&value[..value.len() - 1], 24 * 60 * 60),
        c if c.is_ascii_digit() => (value, 1),
        _ => return None,
    };

    let amount: u64 = digits.parse().ok()?;
    if amount == 0 {
        return None;
    }
    amount
        .checked_mul(multiplier)
        .filter(|secs| *secs <= MAX_DURATION_SECS)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("900"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("12h"), Some(Duration::from_secs(43_200)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(604_800)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("m"), None);
        assert_eq!(parse_duration("7w"), None);
        assert_eq!(parse_duration("-5m"), None);
        assert_eq!(parse_duration("ten"), None);
    }

    #[test]
    fn test_parse_duration_rejects_unrepresentable_lifetimes() {
        assert_eq!(parse_duration("18446744073709551615"), None);
        assert_eq!(parse_duration("9223372036854775807"), None);
        assert_eq!(parse_duration("9999999999999999d"), None);
        assert_eq!(parse_duration("3651d"), None);

        assert_eq!(parse_duration("3650d"), Some(Duration::from_secs(MAX_DURATION_SECS)));
        assert_eq!(
            parse_duration(&MAX_DURATION_SECS.to_string()),
            Some(Duration::from_secs(MAX_DURATION_SECS))
        );
        assert_eq!(parse_duration(&(MAX_DURATION_SECS + 1).to_string()), None);
    }

    #[test]
    fn test_deployment_mode() {
        assert_eq!(DeploymentMode::parse("prod"), Some(DeploymentMode::Production));
        assert_eq!(DeploymentMode::parse("Development"), Some(DeploymentMode::Development));
        assert_eq!(DeploymentMode::parse("test"), Some(DeploymentMode::Test));
        assert_eq!(DeploymentMode::parse("staging"), None);
        assert!(DeploymentMode::Production.is_production());
        assert!(!DeploymentMode::Test.is_production());
    }
}
