//! # Structured Logger 리소스
//!
//! 이름별로 서로 다른 파일에 JSON 로그를 남기는 로거 인스턴스를 만듭니다.
//! `env_logger`의 포맷터와 파이프 타겟 위에 구성되며, 한 줄에 하나의 JSON 객체를 씁니다.
//!
//! ```text
//! {"time":"2026-10-19T09:00:00.000Z","level":"info","tag":"app","msg":"server started"}
//! ```
//!
//! ## 로그 레벨
//!
//! | 설정값 | `LevelFilter` |
//! |--------|---------------|
//! | `debug` | `Debug` |
//! | `info` | `Info` |
//! | `warn` | `Warn` |
//! | `error`, `dpanic`, `panic`, `fatal` | `Error` |
//! | 그 외 | `Info` |
//!
//! 레벨이 `info` 이하(더 상세한 쪽)이면 파일과 함께 stdout에도 출력합니다.
//!
//! ## 종료
//!
//! 로거 종류의 종료 연산은 [`AppLogger::sync`] 입니다. 버퍼를 비우고 파일을 디스크에
//! 동기화합니다.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter, Log, Record};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::ProviderConfig;
use crate::core::adapter::TypedProvider;
use crate::core::errors::ProviderResult;
use crate::core::provider::GenericProvider;

pub const LOG_LEVEL_DEBUG: &str = "debug";
pub const LOG_LEVEL_INFO: &str = "info";
pub const LOG_LEVEL_WARN: &str = "warn";
pub const LOG_LEVEL_ERROR: &str = "error";
pub const LOG_LEVEL_DPANIC: &str = "dpanic";
pub const LOG_LEVEL_PANIC: &str = "panic";
pub const LOG_LEVEL_FATAL: &str = "fatal";

/// 로거 프로바이더의 종류 이름
pub const LOGGER_KIND: &str = "logger";

/// 로거 파라미터가 들어 있는 설정 섹션 키
pub const LOGGER_SECTION: &str = "logger";

/// 로거 생성 파라미터
///
/// 생략된 필드는 아래 기본값을 따릅니다.
///
/// | 필드 | 기본값 |
/// |------|--------|
/// | `log_name` | `logs/log.log` |
/// | `log_level` | `debug` |
/// | `tag` | `default` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerParams {
    /// 로그 파일 경로 (상위 디렉터리는 자동 생성)
    pub log_name: String,
    /// 로그 레벨: debug, info, warn, error, dpanic, panic, fatal
    pub log_level: String,
    /// 모든 로그 줄에 붙는 태그
    pub tag: String,
}

impl Default for LoggerParams {
    fn default() -> Self {
        Self {
            log_name: "logs/log.log".to_string(),
            log_level: LOG_LEVEL_DEBUG.to_string(),
            tag: "default".to_string(),
        }
    }
}

/// 설정 문자열을 `LevelFilter`로 변환합니다.
pub fn convert_level(level: &str) -> LevelFilter {
    match level {
        LOG_LEVEL_DEBUG => LevelFilter::Debug,
        LOG_LEVEL_INFO => LevelFilter::Info,
        LOG_LEVEL_WARN => LevelFilter::Warn,
        LOG_LEVEL_ERROR | LOG_LEVEL_DPANIC | LOG_LEVEL_PANIC | LOG_LEVEL_FATAL => {
            LevelFilter::Error
        }
        _ => LevelFilter::Info,
    }
}

/// 파일과 (선택적으로) stdout에 동시에 쓰는 writer
struct TeeWriter {
    file: File,
    echo_stdout: bool,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        if self.echo_stdout {
            io::stdout().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.echo_stdout {
            io::stdout().flush()?;
        }
        Ok(())
    }
}

/// 이름 붙은 JSON 파일 로거 핸들
///
/// 복제본은 같은 파일과 같은 `env_logger::Logger`를 공유합니다.
#[derive(Clone)]
pub struct AppLogger {
    inner: Arc<env_logger::Logger>,
    file: Arc<File>,
    path: Arc<PathBuf>,
    tag: Arc<str>,
    level: LevelFilter,
}

impl AppLogger {
    /// 파라미터로 로거를 생성합니다. 로그 파일은 append 모드로 열립니다.
    pub fn new(params: LoggerParams) -> ProviderResult<Self> {
        let path = PathBuf::from(&params.log_name);
        let file = open_log_file(&path)?;
        let level = convert_level(&params.log_level);

        let writer = TeeWriter {
            file: file.try_clone()?,
            echo_stdout: level >= LevelFilter::Info,
        };

        let inner = Builder::new()
            .filter_level(level)
            .write_style(WriteStyle::Never)
            .format(|buf, record| {
                let line = json!({
                    "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                    "level": record.level().as_str().to_lowercase(),
                    "tag": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            })
            .target(Target::Pipe(Box::new(writer)))
            .build();

        Ok(Self {
            inner: Arc::new(inner),
            file: Arc::new(file),
            path: Arc::new(path),
            tag: Arc::from(params.tag.as_str()),
            level,
        })
    }

    /// 기본 파라미터(`logs/log.log`, `debug`, `default`)로 로거를 생성합니다.
    pub fn default_logger() -> ProviderResult<Self> {
        Self::new(LoggerParams::default())
    }

    /// 같은 파일을 공유하면서 태그만 다른 로거를 만듭니다.
    pub fn with_tag(&self, tag: &str) -> Self {
        Self {
            tag: Arc::from(tag),
            ..self.clone()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    pub fn log(&self, level: Level, message: &str) {
        self.inner.log(
            &Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(&self.tag)
                .build(),
        );
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// 출력 버퍼를 비우고 로그 파일을 디스크에 동기화합니다.
    pub fn sync(&self) -> io::Result<()> {
        self.inner.flush();
        self.file.sync_all()
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// 로거 프로바이더. 종료 시 모든 로거를 `sync` 합니다.
pub type LoggerProvider = TypedProvider<AppLogger>;

/// 이미 만들어진 로거 레지스트리를 로거 프로바이더로 감쌉니다.
pub fn logger_provider(registry: GenericProvider<AppLogger>) -> LoggerProvider {
    TypedProvider::new(LOGGER_KIND, Arc::new(registry), |logger: AppLogger| async move {
        logger.sync()
    })
}

/// 이름 → 파라미터 매핑으로 로거 프로바이더를 생성합니다.
///
/// 사전순으로 가장 앞선 이름이 기본 로거가 됩니다.
pub fn logger_provider_from_params<I>(params: I) -> ProviderResult<LoggerProvider>
where
    I: IntoIterator<Item = (String, LoggerParams)>,
{
    let registry = GenericProvider::try_from_params(AppLogger::new, params)?;
    Ok(logger_provider(registry))
}

/// 설정의 `logger` 섹션으로 로거 프로바이더를 생성합니다.
pub fn logger_provider_from_config(config: &ProviderConfig) -> ProviderResult<LoggerProvider> {
    let registry = GenericProvider::try_from_config(config, LOGGER_SECTION, AppLogger::new)?;
    Ok(logger_provider(registry))
}
