use std::convert::Infallible;
use std::net::SocketAddr;
use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts},
};
use crate::domains::auth::models::ClientContext;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// 요청에서 클라이언트 IP / User-Agent 추출
/// IP: first `X-Forwarded-For` hop, else the socket peer, else "unknown".
#[async_trait]
impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string);

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let ip_address = forwarded
            .or(peer)
            .unwrap_or_else(|| ClientContext::UNKNOWN.to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .filter(|ua| !ua.is_empty())
            .unwrap_or(ClientContext::UNKNOWN)
            .to_string();

        Ok(ClientContext::new(ip_address, user_agent))
    }
}
