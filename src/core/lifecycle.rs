//! # Shutdown Group
//!
//! 서로 다른 종류의 프로바이더를 하나로 묶어 일괄 종료합니다.
//!
//! - 등록의 **역순**으로 종료합니다. 다른 리소스가 의존하는 프로바이더(예: 로거)를
//!   먼저 등록해 두면 가장 마지막에 정리됩니다.
//! - 프로바이더 단위의 종료와 동일하게 fail-fast 입니다. 첫 번째 실패를 반환하고,
//!   아직 차례가 오지 않은 프로바이더는 종료하지 않습니다.
//!
//! ```rust,ignore
//! let mut group = ShutdownGroup::new();
//! group.register("logger", Arc::new(loggers.clone()));
//! group.register("database", Arc::new(databases.clone()));
//! group.register("cache", Arc::new(caches.clone()));
//!
//! // cache → database → logger
//! group.shutdown().await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use crate::core::errors::ProviderResult;
use crate::core::provider::Shutdown;

/// 종료 순서를 가진 프로바이더 묶음
#[derive(Default, Clone)]
pub struct ShutdownGroup {
    members: Vec<(String, Arc<dyn Shutdown>)>,
}

impl ShutdownGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종료 대상을 등록합니다. 나중에 등록한 것이 먼저 종료됩니다.
    pub fn register(&mut self, label: impl Into<String>, member: Arc<dyn Shutdown>) {
        self.members.push((label.into(), member));
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// 등록 순서대로의 라벨 목록
    pub fn labels(&self) -> Vec<&str> {
        self.members.iter().map(|(label, _)| label.as_str()).collect()
    }
}

#[async_trait]
impl Shutdown for ShutdownGroup {
    async fn shutdown(&self) -> ProviderResult<()> {
        for (label, member) in self.members.iter().rev() {
            info!("🛑 Shutting down {}", label);
            if let Err(e) = member.shutdown().await {
                error!("❌ {} shutdown failed: {}", label, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ProviderError;
    use std::sync::Mutex;

    struct Recorder {
        label: &'static str,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Shutdown for Recorder {
        async fn shutdown(&self) -> ProviderResult<()> {
            self.log.lock().expect("lock").push(self.label);
            if self.fail {
                Err(ProviderError::shutdown(self.label, "x", "boom"))
            } else {
                Ok(())
            }
        }
    }

    fn group(members: &[(&'static str, bool)]) -> (ShutdownGroup, Arc<Mutex<Vec<&'static str>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut group = ShutdownGroup::new();
        for (label, fail) in members {
            group.register(
                *label,
                Arc::new(Recorder {
                    label: *label,
                    fail: *fail,
                    log: Arc::clone(&log),
                }),
            );
        }
        (group, log)
    }

    #[tokio::test]
    async fn test_group_shuts_down_in_reverse_order() {
        let (group, log) = group(&[("logger", false), ("database", false), ("cache", false)]);

        assert_eq!(group.labels(), vec!["logger", "database", "cache"]);
        group.shutdown().await.expect("all succeed");

        assert_eq!(*log.lock().expect("lock"), vec!["cache", "database", "logger"]);
    }

    #[tokio::test]
    async fn test_group_stops_at_first_failure() {
        let (group, log) = group(&[("logger", false), ("database", true), ("cache", false)]);

        let error = group.shutdown().await.expect_err("database fails");

        assert!(matches!(
            error,
            ProviderError::ShutdownError { ref kind, .. } if kind == "database"
        ));
        assert_eq!(*log.lock().expect("lock"), vec!["cache", "database"]);
    }

    #[tokio::test]
    async fn test_empty_group() {
        let group = ShutdownGroup::new();

        assert!(group.is_empty());
        assert!(group.shutdown().await.is_ok());
    }
}
