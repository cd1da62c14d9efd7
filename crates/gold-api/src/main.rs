//! Gold API 서버 진입점.
//!
//! 설정 로드 → 로깅 초기화 → 시장 시계 / Fetcher / 캐시 생성 → HTTP 서버 시작.

use anyhow::Context;
use axum::http::StatusCode;
use axum::Router;
use gold_core::{init_logging, AppConfig, LogConfig};
use gold_data::{
    CurrencyFetcher, GoldUpdatesFetcher, JewelryFetcher, MarketCache, MarketClock, RefreshPolicy,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use gold_api::{create_api_router, AppState};

/// 설정으로 공유 상태 생성.
fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let clock = MarketClock::from_config(&config.market).context("시장 스케줄 설정 오류")?;
    let policy = RefreshPolicy::from_config(&config.cache);

    match clock.schedule() {
        Some(schedule) => info!(
            timezone = %schedule.timezone().name(),
            open = %schedule.open_time(),
            close = %schedule.close_time(),
            closed = %schedule.closed_weekday(),
            interval_secs = policy.active_interval.as_secs(),
            "시장 시간 기반 캐시 사용"
        ),
        None => info!(
            interval_secs = policy.active_interval.as_secs(),
            "고정 간격 캐시 사용 (시장 시간 무시)"
        ),
    }

    let gold = GoldUpdatesFetcher::from_config(&config.sources).context("금 시세 Fetcher 생성 실패")?;
    let currency = CurrencyFetcher::from_config(&config.sources).context("환율 Fetcher 생성 실패")?;
    let jewelry = JewelryFetcher::from_config(&config.sources).context("장신구 Fetcher 생성 실패")?;

    let cache = MarketCache::new(Arc::new(gold), Arc::new(currency), clock, policy);

    Ok(AppState::new(Arc::new(cache), Arc::new(jewelry)))
}

/// 미들웨어를 포함한 전체 라우터 생성.
fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting Gold API server...");

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. GOLD__SERVER__HOST, GOLD__SERVER__PORT를 확인하세요."
        );
        e
    })?;

    let state = Arc::new(create_app_state(&config)?);
    let app = create_router(state, config.server.request_timeout());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{} 바인드 실패", addr))?;
    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C 핸들러 설치 실패");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM 핸들러 설치 실패");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
