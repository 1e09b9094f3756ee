//! tracing 기반 로깅 초기화.
//!
//! 수집 바이너리는 시작할 때 [`init_logging`]을 한 번 호출합니다.
//! 형식은 `--log-format` 플래그, 없으면 `LOG_FORMAT` 환경변수로 고릅니다.
//! 워커가 멀티스레드 런타임에서 돌기 때문에 스레드 ID는 기본으로 켭니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 형식 플래그가 없을 때 참조하는 환경변수.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄 컬러 출력 (개발용)
    #[default]
    Pretty,
    /// 한 줄 JSON (로그 수집기용)
    Json,
    /// 한 줄 텍스트 (장시간 수집 작업용)
    Compact,
}

impl LogFormat {
    /// 명시된 형식이 있으면 그것을, 없으면 `LOG_FORMAT` 값을 사용합니다.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, String> {
        match explicit {
            Some(name) => name.parse(),
            None => match std::env::var(LOG_FORMAT_ENV) {
                Ok(name) => name.parse(),
                Err(_) => Ok(Self::default()),
            },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("알 수 없는 로그 형식: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 레벨 필터 (예: "info", "pairs_collector=debug"). `RUST_LOG`가 우선
    pub level: String,
    pub format: LogFormat,
    /// 스레드 ID 출력 (워커 구분용)
    pub with_thread_ids: bool,
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::default(),
            with_thread_ids: true,
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    fn filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// 전역 구독자를 설치합니다. 두 번째 호출은 에러를 반환합니다.
///
/// ```no_run
/// use pairs_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("debug").with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let base = fmt::layer().with_thread_ids(config.with_thread_ids);
    let fmt_layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().with_ansi(false).boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(config.filter()?)
        .try_init()?;

    tracing::debug!(format = ?config.format, level = %config.level, "로깅 초기화");
    Ok(())
}
