//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → 환경 변수(`GOLD__` 접두사) 순으로 덮어씁니다.
//!
//! ```text
//! GOLD__SERVER__PORT=9000
//! GOLD__CACHE__ACTIVE_INTERVAL_SECS=60
//! GOLD__MARKET__HOURS_ENABLED=false
//! ```

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 설정 파일 경로를 지정하는 환경 변수.
pub const CONFIG_PATH_ENV: &str = "GOLD_CONFIG";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 시장 운영 시간 설정
    pub market: MarketConfig,
    /// 캐시 갱신 정책
    pub cache: CacheConfig,
    /// 외부 데이터 소스 설정
    pub sources: SourcesConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 처리 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    pub fn socket_addr(&self) -> CoreResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CoreError::Config(format!("잘못된 바인드 주소 {}:{}: {}", self.host, self.port, e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "gold_api=info,gold_data=info,tower_http=info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 시장 운영 시간 설정.
///
/// 문자열 그대로 보관하고, 파싱/검증은 `gold_data::MarketSchedule`이 기동 시점에 수행합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    /// IANA 시간대 (예: "Asia/Bangkok")
    pub timezone: String,
    /// 개장 시각 (HH:MM 또는 HH:MM:SS, 포함)
    pub open_time: String,
    /// 폐장 시각 (HH:MM 또는 HH:MM:SS, 포함)
    pub close_time: String,
    /// 하루 종일 휴장하는 요일 (예: "Sun")
    pub closed_weekday: String,
    /// false면 시장 시간을 무시하고 항상 개장 상태로 취급
    pub hours_enabled: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Bangkok".to_string(),
            open_time: "09:00:00".to_string(),
            close_time: "17:30:00".to_string(),
            closed_weekday: "Sun".to_string(),
            hours_enabled: true,
        }
    }
}

/// 캐시 갱신 정책 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// 장중 재조회 최소 간격 (초)
    pub active_interval_secs: u64,
    /// 단일 조회 최대 대기 시간 (초)
    pub fetch_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            active_interval_secs: 120,
            fetch_timeout_secs: 15,
        }
    }
}

impl CacheConfig {
    pub fn active_interval(&self) -> Duration {
        Duration::from_secs(self.active_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 외부 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// 모든 요청에 사용할 User-Agent
    pub user_agent: String,
    /// 금 시세 갱신 내역 페이지 (goldtraders.or.th)
    pub gold_updates_url: String,
    /// 장신구 시세 페이지 (goldtraders.or.th)
    pub jewelry_url: String,
    /// 환율 JSON 피드 (thaigold.info)
    pub currency_url: String,
    /// 환율 피드에서 찾을 통화 이름
    pub currency: String,
    /// goldtraders 요청 타임아웃 (초)
    pub goldtraders_timeout_secs: u64,
    /// 환율 피드 요청 타임아웃 (초)
    pub currency_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            gold_updates_url: "https://www.goldtraders.or.th/UpdatePriceList.aspx".to_string(),
            jewelry_url: "https://www.goldtraders.or.th/DailyPrices.aspx".to_string(),
            currency_url: "https://www.thaigold.info/RealTimeDataV2/gtdata_.txt".to_string(),
            currency: "THB".to_string(),
            goldtraders_timeout_secs: 10,
            currency_timeout_secs: 5,
        }
    }
}

impl SourcesConfig {
    pub fn goldtraders_timeout(&self) -> Duration {
        Duration::from_secs(self.goldtraders_timeout_secs)
    }

    pub fn currency_timeout(&self) -> Duration {
        Duration::from_secs(self.currency_timeout_secs)
    }
}

impl AppConfig {
    /// 기본값, 설정 파일(없으면 건너뜀), 환경 변수 순으로 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("GOLD")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `GOLD_CONFIG` 경로 또는 기본 경로에서 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 기동 전에 값의 범위를 검증합니다.
    ///
    /// 시장 스케줄 문자열의 파싱은 `MarketSchedule::from_config`에서 따로 검증합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.server.port == 0 {
            return Err(CoreError::Config("server.port는 0일 수 없습니다".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "server.request_timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.cache.active_interval_secs == 0 {
            return Err(CoreError::Config(
                "cache.active_interval_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.cache.fetch_timeout_secs == 0 {
            return Err(CoreError::Config(
                "cache.fetch_timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }

        let required = [
            ("sources.gold_updates_url", &self.sources.gold_updates_url),
            ("sources.jewelry_url", &self.sources.jewelry_url),
            ("sources.currency_url", &self.sources.currency_url),
            ("sources.currency", &self.sources.currency),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("{}가 비어 있습니다", key)));
            }
        }

        if self.sources.goldtraders_timeout_secs == 0 || self.sources.currency_timeout_secs == 0 {
            return Err(CoreError::Config(
                "소스 요청 타임아웃은 0보다 커야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}
