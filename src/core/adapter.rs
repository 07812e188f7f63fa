//! # Typed Shutdown Adapter
//!
//! [`GenericProvider`]에 리소스 종류별 종료 절차를 덧붙이는 래퍼입니다.
//! 상속 대신 "인스턴스 하나를 닫는 함수"([`Closer`])를 주입받는 전략 패턴을 사용합니다.
//!
//! ## 구조
//!
//! ```text
//! TypedProvider<T>
//!   ├─ kind:     "database" | "cache" | "logger" | ...
//!   ├─ registry: Arc<GenericProvider<T>>   ← 내용 복사 없이 공유
//!   └─ closer:   Fn(T) -> Future<Result<(), BoxError>>
//! ```
//!
//! ## 종료 규칙 (fail-fast)
//!
//! 1. 읽기 잠금 아래에서 `(이름, 값)` 스냅샷을 뜨고 잠금을 즉시 해제합니다.
//! 2. 이름의 **사전순**으로 closer를 하나씩 await 합니다.
//! 3. 첫 번째 실패에서 `ShutdownError`를 반환하고 멈춥니다.
//!    실패한 이름보다 뒤에 있는 인스턴스는 닫히지 않은 채로 남습니다.
//!
//! 방문 순서가 고정되어 있으므로, 실패 후 어떤 인스턴스가 열린 채로 남았는지는
//! 항상 결정적입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = Arc::new(GenericProvider::try_from_params(Database::connect, params)?);
//! let databases = TypedProvider::new("database", registry, |db: Database| async move {
//!     db.close().await
//! });
//!
//! let primary = databases.get_default();
//! databases.shutdown().await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::{debug, error, info};

use crate::core::errors::{BoxError, ErrorContext, ProviderResult};
use crate::core::provider::{GenericProvider, Provider, Shutdown};

/// 인스턴스 하나를 닫는 주입 함수
pub type Closer<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// 리소스 종류별 종료 절차를 가진 프로바이더
pub struct TypedProvider<T> {
    kind: &'static str,
    registry: Arc<GenericProvider<T>>,
    closer: Closer<T>,
}

impl<T> TypedProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// 레지스트리와 close 함수를 묶어 어댑터를 만듭니다.
    pub fn new<F, Fut, E>(kind: &'static str, registry: Arc<GenericProvider<T>>, close: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        let closer: Closer<T> =
            Arc::new(move |value: T| -> BoxFuture<'static, Result<(), BoxError>> {
                let closing = close(value);
                async move { closing.await.map_err(Into::<BoxError>::into) }.boxed()
            });
        Self {
            kind,
            registry,
            closer,
        }
    }

    /// 리소스 종류 이름 (로그와 에러 메시지에 사용)
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// 감싸고 있는 레지스트리
    pub fn registry(&self) -> &Arc<GenericProvider<T>> {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.registry.names()
    }
}

impl<T> Clone for TypedProvider<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            registry: Arc::clone(&self.registry),
            closer: Arc::clone(&self.closer),
        }
    }
}

impl<T> Provider<T> for TypedProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn add(&self, name: &str, value: T, make_default: bool) {
        self.registry.add(name, value, make_default);
    }

    fn get(&self, name: &str) -> Option<T> {
        self.registry.get(name)
    }

    fn get_default(&self) -> Option<T> {
        self.registry.get_default()
    }

    fn set_default(&self, name: &str) -> bool {
        self.registry.set_default(name)
    }
}

#[async_trait]
impl<T> Shutdown for TypedProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn shutdown(&self) -> ProviderResult<()> {
        let instances = self.registry.snapshot();
        let total = instances.len();

        for (name, value) in instances {
            debug!("closing {} '{}'", self.kind, name);
            (self.closer)(value)
                .await
                .shutdown_context(self.kind, &name)
                .inspect_err(|e| error!("❌ {} shutdown aborted: {}", self.kind, e))?;
        }

        info!("✅ {} provider closed ({} instances)", self.kind, total);
        Ok(())
    }
}
