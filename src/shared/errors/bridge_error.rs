use thiserror::Error;

/// 사용자 디렉터리(외부 서비스) 호출 에러
/// Errors from the user directory. "Not found" is not an error: it is `Ok(None)`.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// 전송 실패, 타임아웃, 예상하지 못한 상태 코드
    /// Transport failure, timeout or unexpected upstream status
    #[error("User directory unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BridgeError::Unavailable("request timed out".to_string())
        } else {
            BridgeError::Unavailable(err.to_string())
        }
    }
}
