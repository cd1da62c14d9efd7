//! 공통 에러 타입.
//!
//! 설정 로드/검증처럼 서버 기동 시점에 발생하는 치명적 에러를 정의합니다.
//! 요청 처리 중의 네트워크 에러는 `gold-data`의 `FetchError`가 담당합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 시장 운영 스케줄 에러 (잘못된 시간대, 시각, 요일 등)
    #[error("잘못된 시장 스케줄: {0}")]
    InvalidSchedule(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
