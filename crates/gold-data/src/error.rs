//! 데이터 소스 오류 타입.

use thiserror::Error;

/// 외부 데이터 조회 오류.
///
/// 모두 일시적인 오류로 취급되며 캐시 계층에서 흡수됩니다.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 요청 실패 (연결 거부, DNS, TLS 등)
    #[error("HTTP 요청 실패: {0}")]
    Http(String),

    /// 응답 대기 시간 초과
    #[error("요청 타임아웃: {0}")]
    Timeout(String),

    /// 200 이외의 응답 코드
    #[error("비정상 응답 코드: {0}")]
    Status(u16),

    /// 문서는 받았으나 기대한 데이터가 없음 (테이블 없음, 빈 목록 등)
    #[error("데이터 없음: {0}")]
    EmptyDocument(String),

    /// 응답 파싱 실패
    #[error("파싱 실패: {0}")]
    Parse(String),
}

impl FetchError {
    /// 재시도로 해결될 가능성이 있는 오류인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Timeout(_) => true,
            FetchError::Status(code) => *code == 429 || *code >= 500,
            FetchError::EmptyDocument(_) | FetchError::Parse(_) => false,
        }
    }

    /// 로그/상태 응답용 고정 라벨.
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Http(_) => "http",
            FetchError::Timeout(_) => "timeout",
            FetchError::Status(_) => "status",
            FetchError::EmptyDocument(_) => "empty_document",
            FetchError::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
