//! # Gold Core
//!
//! 금 시세 API의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 금 시세 갱신 기록 / 장신구 시세 / 환율 레코드
//! - 설정 관리 (`config` 크레이트 기반)
//! - 로깅 인프라 (`tracing`)
//! - 공통 에러 타입

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
