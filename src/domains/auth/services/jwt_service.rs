// src/domains/auth/services/jwt_service.rs
use crate::shared::config::JwtConfig;
use crate::shared::errors::AuthError;
use crate::domains::auth::models::jwt::{AccessClaims, RefreshClaims};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;

/// token id 길이 (바이트) - 384 bits
const TOKEN_ID_BYTES: usize = 48;

/// JWT 서비스
/// Signs and verifies the two credential kinds. Access and refresh tokens use
/// independent secrets and lifetimes, so neither key can forge the other kind.
#[derive(Clone)]
pub struct JwtService {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            access_encoding_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Access Token 발급 (짧은 수명)
    /// Generate Access Token (short lifetime)
    pub fn generate_access_token(&self, user_id: u64) -> Result<String, AuthError> {
        let claims = AccessClaims::new(user_id, self.access_ttl)
            .ok_or_else(|| AuthError::Internal("Access token lifetime out of range".to_string()))?;

        encode(&Header::default(), &claims, &self.access_encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate access token: {}", e)))
    }

    /// Refresh Token 발급 (token_id 포함, 긴 수명)
    /// Generate Refresh Token embedding the store record id
    pub fn generate_refresh_token(&self, user_id: u64, token_id: &str) -> Result<String, AuthError> {
        let claims = RefreshClaims::new(user_id, token_id.to_string(), self.refresh_ttl)
            .ok_or_else(|| AuthError::Internal("Refresh token lifetime out of range".to_string()))?;

        encode(&Header::default(), &claims, &self.refresh_encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate refresh token: {}", e)))
    }

    /// 새 token id 생성 (OS 난수, base64url)
    /// Generate a fresh opaque token id from the OS CSPRNG
    pub fn generate_token_id(&self) -> String {
        let mut bytes = [0u8; TOKEN_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Access Token 검증
    /// 서명 오류, 형식 오류, 만료 모두 InvalidToken
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.access_decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Refresh Token 검증
    /// Same failure modes as access verification, against the refresh secret
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        let claims = decode::<RefreshClaims>(token, &self.refresh_decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)?;

        if claims.token_id.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }
}
