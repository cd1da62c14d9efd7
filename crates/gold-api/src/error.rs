//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// 데이터를 제공할 수 없을 때의 에러 코드
pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "SERVICE_UNAVAILABLE",
///   "message": "Cannot fetch currency data",
///   "timestamp": 1792368000
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "SERVICE_UNAVAILABLE")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    pub timestamp: i64,
}

impl ApiErrorResponse {
    /// 현재 시각을 타임스탬프로 기록합니다.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 503 응답 생성.
pub fn service_unavailable(message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiErrorResponse::new(SERVICE_UNAVAILABLE, message)),
    )
}
