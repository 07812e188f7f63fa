//! # Resource Bootstrap
//!
//! 설정 문서 하나로 모든 리소스 종류의 프로바이더를 만들고, 종료 순서를 가진
//! [`ShutdownGroup`]으로 묶습니다.
//!
//! ## 초기화 순서
//!
//! ```text
//! 1. logger   ← 설정 "logger" 섹션
//! 2. database ← 설정 "database" 섹션 (기본 로거가 있으면 공유)
//! 3. cache    ← 설정 "redis" 섹션
//! ```
//!
//! 종료는 역순(cache → database → logger)이므로 로거가 마지막까지 남아
//! 다른 리소스의 종료 로그를 받을 수 있습니다.
//!
//! 어느 단계든 실패하면 그 에러를 그대로 반환합니다. 이미 만들어진 프로바이더는
//! 드롭되며, 생성 시점에는 네트워크 연결이 없으므로 닫을 연결도 없습니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::config::ProviderConfig;
use crate::core::errors::ProviderResult;
use crate::core::lifecycle::ShutdownGroup;
use crate::core::provider::{Provider, Shutdown};
use crate::resources::cache::{CacheProvider, cache_provider_from_config};
use crate::resources::database::{
    DatabaseProvider, database_provider_from_config, database_provider_from_config_with_logger,
};
use crate::resources::logger::{LoggerProvider, logger_provider_from_config};

/// 리소스 종류 하나의 요약
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSummary {
    pub kind: &'static str,
    pub names: Vec<String>,
}

/// 애플리케이션이 사용하는 모든 리소스 프로바이더
#[derive(Clone)]
pub struct Resources {
    pub loggers: LoggerProvider,
    pub databases: DatabaseProvider,
    pub caches: CacheProvider,
    group: ShutdownGroup,
}

impl Resources {
    /// 설정 문서로 모든 프로바이더를 생성합니다.
    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        let loggers = logger_provider_from_config(config)?;
        info!("📝 logger provider ready ({} instances)", loggers.len());

        let databases = match loggers.get_default() {
            Some(logger) => database_provider_from_config_with_logger(config, &logger)?,
            None => database_provider_from_config(config)?,
        };
        info!("📡 database provider ready ({} instances)", databases.len());

        let caches = cache_provider_from_config(config)?;
        info!("⚡ cache provider ready ({} instances)", caches.len());

        let mut group = ShutdownGroup::new();
        group.register(loggers.kind(), Arc::new(loggers.clone()));
        group.register(databases.kind(), Arc::new(databases.clone()));
        group.register(caches.kind(), Arc::new(caches.clone()));

        Ok(Self {
            loggers,
            databases,
            caches,
            group,
        })
    }

    /// 등록 순서대로의 종류별 요약
    pub fn summary(&self) -> Vec<ProviderSummary> {
        vec![
            ProviderSummary {
                kind: self.loggers.kind(),
                names: self.loggers.names(),
            },
            ProviderSummary {
                kind: self.databases.kind(),
                names: self.databases.names(),
            },
            ProviderSummary {
                kind: self.caches.kind(),
                names: self.caches.names(),
            },
        ]
    }

    pub fn total_instances(&self) -> usize {
        self.loggers.len() + self.databases.len() + self.caches.len()
    }

    pub fn shutdown_group(&self) -> &ShutdownGroup {
        &self.group
    }
}

#[async_trait]
impl Shutdown for Resources {
    async fn shutdown(&self) -> ProviderResult<()> {
        self.group.shutdown().await
    }
}
