//! 시장 운영 시간 판단.
//!
//! 태국 금 시장 기본 스케줄:
//! - 시간대: Asia/Bangkok
//! - 운영: 09:00:00 ~ 17:30:00 (양 끝 포함)
//! - 휴장: 일요일 (그 외 요일은 모두 같은 시간대 적용)
//!
//! 순수 함수이며 I/O나 내부 상태가 없습니다. 설정 오류는 기동 시점에
//! `from_config`가 반환하고, 호출 시점에는 실패하지 않습니다.

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use gold_core::{CoreError, CoreResult, MarketConfig};

/// 주간 시장 운영 스케줄.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketSchedule {
    timezone: Tz,
    open_time: NaiveTime,
    close_time: NaiveTime,
    closed_weekday: Weekday,
}

impl MarketSchedule {
    /// 스케줄 생성. `open_time`이 `close_time`보다 늦으면 에러.
    pub fn new(
        timezone: Tz,
        open_time: NaiveTime,
        close_time: NaiveTime,
        closed_weekday: Weekday,
    ) -> CoreResult<Self> {
        if open_time > close_time {
            return Err(CoreError::InvalidSchedule(format!(
                "개장 시각({})이 폐장 시각({})보다 늦습니다",
                open_time, close_time
            )));
        }

        Ok(Self {
            timezone,
            open_time,
            close_time,
            closed_weekday,
        })
    }

    /// 설정 문자열에서 스케줄 생성.
    pub fn from_config(config: &MarketConfig) -> CoreResult<Self> {
        let timezone: Tz = config.timezone.parse().map_err(|e| {
            CoreError::InvalidSchedule(format!("알 수 없는 시간대 '{}': {}", config.timezone, e))
        })?;
        let open_time = parse_time_of_day(&config.open_time)?;
        let close_time = parse_time_of_day(&config.close_time)?;
        let closed_weekday = parse_weekday(&config.closed_weekday)?;

        Self::new(timezone, open_time, close_time, closed_weekday)
    }

    /// 주어진 시각에 시장이 열려 있는지 확인.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.timezone);

        if local.weekday() == self.closed_weekday {
            return false;
        }

        let time_of_day = local.time();
        self.open_time <= time_of_day && time_of_day <= self.close_time
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn open_time(&self) -> NaiveTime {
        self.open_time
    }

    pub fn close_time(&self) -> NaiveTime {
        self.close_time
    }

    pub fn closed_weekday(&self) -> Weekday {
        self.closed_weekday
    }
}

/// 시장 시계.
///
/// `AlwaysOpen`은 시장 시간을 무시하고 고정 간격으로만 갱신하는 구성입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketClock {
    /// 항상 개장 (고정 간격 갱신)
    AlwaysOpen,
    /// 스케줄 기반
    Scheduled(MarketSchedule),
}

impl MarketClock {
    /// 설정에서 시계 생성. `hours_enabled = false`면 `AlwaysOpen`.
    ///
    /// `AlwaysOpen`이어도 스케줄 문자열은 검증합니다.
    pub fn from_config(config: &MarketConfig) -> CoreResult<Self> {
        let schedule = MarketSchedule::from_config(config)?;
        if config.hours_enabled {
            Ok(MarketClock::Scheduled(schedule))
        } else {
            Ok(MarketClock::AlwaysOpen)
        }
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        match self {
            MarketClock::AlwaysOpen => true,
            MarketClock::Scheduled(schedule) => schedule.is_open(now),
        }
    }

    pub fn schedule(&self) -> Option<&MarketSchedule> {
        match self {
            MarketClock::AlwaysOpen => None,
            MarketClock::Scheduled(schedule) => Some(schedule),
        }
    }
}

/// "HH:MM:SS" 또는 "HH:MM" 파싱.
fn parse_time_of_day(raw: &str) -> CoreResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| CoreError::InvalidSchedule(format!("잘못된 시각 '{}': {}", raw, e)))
}

/// 요일 파싱.
///
/// "Sun", "sunday" 같은 이름과 월요일=0 기준 숫자("6" = 일요일)를 모두 받습니다.
fn parse_weekday(raw: &str) -> CoreResult<Weekday> {
    let raw = raw.trim();

    if let Ok(index) = raw.parse::<u8>() {
        return match index {
            0 => Ok(Weekday::Mon),
            1 => Ok(Weekday::Tue),
            2 => Ok(Weekday::Wed),
            3 => Ok(Weekday::Thu),
            4 => Ok(Weekday::Fri),
            5 => Ok(Weekday::Sat),
            6 => Ok(Weekday::Sun),
            _ => Err(CoreError::InvalidSchedule(format!(
                "요일 번호는 0(월)~6(일)이어야 합니다: {}",
                index
            ))),
        };
    }

    raw.parse::<Weekday>()
        .map_err(|_| CoreError::InvalidSchedule(format!("알 수 없는 요일 '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Bangkok;

    fn bangkok(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Bangkok
            .with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn default_schedule() -> MarketSchedule {
        MarketSchedule::from_config(&MarketConfig::default()).unwrap()
    }

    #[test]
    fn test_closed_weekday_is_closed_all_day() {
        let schedule = default_schedule();
        // 2026-10-18은 일요일
        for hour in [0, 9, 12, 17, 23] {
            assert!(!schedule.is_open(bangkok(2026, 10, 18, hour, 0, 0)), "hour {}", hour);
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let schedule = default_schedule();
        // 2026-10-19 월요일
        assert!(schedule.is_open(bangkok(2026, 10, 19, 9, 0, 0)));
        assert!(schedule.is_open(bangkok(2026, 10, 19, 17, 30, 0)));
        assert!(!schedule.is_open(bangkok(2026, 10, 19, 8, 59, 59)));
        assert!(!schedule.is_open(bangkok(2026, 10, 19, 17, 30, 1)));
    }

    #[test]
    fn test_saturday_follows_window() {
        let schedule = default_schedule();
        // 2026-10-17 토요일
        assert!(schedule.is_open(bangkok(2026, 10, 17, 12, 0, 0)));
        assert!(!schedule.is_open(bangkok(2026, 10, 17, 20, 0, 0)));
    }

    #[test]
    fn test_converts_from_utc() {
        let schedule = default_schedule();
        // UTC 02:00 월요일 = 방콕 09:00 월요일
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 2, 0, 0).unwrap();
        assert!(schedule.is_open(now));

        // UTC 20:00 토요일 = 방콕 03:00 일요일
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 20, 0, 0).unwrap();
        assert!(!schedule.is_open(now));
    }

    #[test]
    fn test_always_open_clock() {
        let clock = MarketClock::AlwaysOpen;
        assert!(clock.is_open(bangkok(2026, 10, 18, 3, 0, 0)));
        assert!(clock.schedule().is_none());
    }

    #[test]
    fn test_clock_from_config() {
        let mut config = MarketConfig::default();
        assert!(matches!(
            MarketClock::from_config(&config).unwrap(),
            MarketClock::Scheduled(_)
        ));

        config.hours_enabled = false;
        assert_eq!(MarketClock::from_config(&config).unwrap(), MarketClock::AlwaysOpen);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MarketConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            MarketSchedule::from_config(&config),
            Err(CoreError::InvalidSchedule(_))
        ));

        let config = MarketConfig {
            open_time: "18:00".to_string(),
            ..Default::default()
        };
        assert!(MarketSchedule::from_config(&config).is_err());

        let config = MarketConfig {
            closed_weekday: "Funday".to_string(),
            ..Default::default()
        };
        assert!(MarketSchedule::from_config(&config).is_err());
    }

    #[test]
    fn test_parse_weekday_variants() {
        assert_eq!(parse_weekday("Sun").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday("sunday").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday("6").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday("0").unwrap(), Weekday::Mon);
        assert!(parse_weekday("7").is_err());
    }

    #[test]
    fn test_parse_time_short_form() {
        assert_eq!(
            parse_time_of_day("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert!(parse_time_of_day("25:00").is_err());
    }
}
