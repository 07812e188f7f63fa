//! # Provider Error Handling
//!
//! 프로바이더 계층 전체에서 사용하는 통합 에러 타입입니다.
//! 설정 디코딩, 리소스 생성, 종료(shutdown) 단계에서 발생하는 실패를
//! 하나의 열거형으로 표현하며, 원인 에러는 `source()` 체인으로 보존됩니다.
//!
//! ## 에러 분류
//!
//! | ProviderError | 발생 시점 | 처리 방식 |
//! |---------------|-----------|-----------|
//! | `ConfigParseError` | 설정 문서 파싱 | 생성 시작 전에 즉시 반환 |
//! | `ConfigDecodeError` | 설정 섹션 디코딩 | 생성 시작 전에 즉시 반환 |
//! | `ConfigIoError` | 설정 파일 읽기 | 생성 시작 전에 즉시 반환 |
//! | `ConstructionError` | 팩토리 호출 실패 | fail-fast, 부분 레지스트리 없음 |
//! | `ShutdownError` | close/flush 실패 | fail-fast, 남은 인스턴스는 열린 상태 |
//! | `UnsupportedDriver` | 데이터베이스 파라미터 검증 | 팩토리 에러 |
//! | `UnsupportedTopology` | 캐시 파라미터 검증 | 팩토리 에러 |
//! | `ResourceClosed` | 닫힌 핸들 사용 | 호출자에게 반환 |
//! | `RuntimeUnavailable` | tokio 런타임 밖에서 클라이언트 생성 | 팩토리 에러 |
//!
//! 이름 조회 실패(`get`, `set_default`)는 에러가 아니라 `Option`/`bool` 결과로
//! 표현됩니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use resource_provider::core::errors::{ErrorContext, ProviderResult};
//!
//! fn open(name: &str) -> ProviderResult<std::fs::File> {
//!     std::fs::File::open("app.log").construction_context(name)
//! }
//! ```

use std::error::Error as StdError;
use thiserror::Error;

/// 팩토리와 closer가 반환하는 임의의 에러를 담는 박스 타입
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Config parse error: {source}")]
    ConfigParseError {
        #[source]
        source: serde_json::Error,
    },

    #[error("Config decode error for key '{key}': {source}")]
    ConfigDecodeError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config io error ({path}): {source}")]
    ConfigIoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Construction error for '{name}': {source}")]
    ConstructionError {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Shutdown error for {kind} '{name}': {source}")]
    ShutdownError {
        kind: String,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("Unsupported cache topology: {0}")]
    UnsupportedTopology(String),

    #[error("Resource is closed: {0}")]
    ResourceClosed(String),

    #[error("Async runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProviderError {
    /// 이름이 붙은 생성 실패 에러를 만듭니다.
    pub fn construction(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ProviderError::ConstructionError {
            name: name.into(),
            source: source.into(),
        }
    }

    /// 리소스 종류와 이름이 붙은 종료 실패 에러를 만듭니다.
    pub fn shutdown(
        kind: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        ProviderError::ShutdownError {
            kind: kind.into(),
            name: name.into(),
            source: source.into(),
        }
    }

    /// 실패한 리소스 이름 (생성/종료 에러인 경우)
    pub fn resource_name(&self) -> Option<&str> {
        match self {
            ProviderError::ConstructionError { name, .. } => Some(name),
            ProviderError::ShutdownError { name, .. } => Some(name),
            _ => None,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// 외부 에러에 리소스 이름을 붙여 `ProviderError`로 변환하는 확장 trait
pub trait ErrorContext<T> {
    fn construction_context(self, name: &str) -> ProviderResult<T>;

    fn shutdown_context(self, kind: &str, name: &str) -> ProviderResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn construction_context(self, name: &str) -> ProviderResult<T> {
        self.map_err(|e| ProviderError::construction(name, e))
    }

    fn shutdown_context(self, kind: &str, name: &str) -> ProviderResult<T> {
        self.map_err(|e| ProviderError::shutdown(kind, name, e))
    }
}
