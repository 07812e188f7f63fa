//! # Generic Provider - 이름 기반 다중 인스턴스 레지스트리
//!
//! 동일한 종류의 리소스 핸들(데이터베이스 연결, 캐시 클라이언트, 로거 등)을
//! 이름으로 보관하고, 그 중 하나를 "기본(default)" 인스턴스로 추적하는
//! 동시성 안전 컨테이너입니다.
//!
//! ## 동작 규칙
//!
//! - **첫 등록은 항상 기본값**: 비어 있는 레지스트리에 처음 `add`된 값은
//!   `make_default` 플래그와 관계없이 기본 인스턴스가 됩니다.
//! - **명시적 기본값 우선**: `make_default = true`로 등록하면 즉시 기본값이 바뀝니다.
//! - **덮어쓰기 허용**: 같은 이름으로 다시 `add`하면 저장된 값만 교체되며,
//!   기본 인스턴스는 자동으로 갱신되지 않습니다.
//! - **조회 실패는 에러가 아님**: `get`은 `Option`, `set_default`는 `bool`을 반환합니다.
//!
//! ## 동시성 모델
//!
//! 컨테이너와 기본 슬롯은 하나의 `RwLock` 안에 함께 있으므로, 읽는 쪽은
//! 절반만 갱신된 상태를 볼 수 없습니다.
//!
//! | 연산 | 잠금 |
//! |------|------|
//! | `add`, `set_default` | 쓰기 잠금 (배타적) |
//! | `get`, `get_default`, `names`, `snapshot` | 읽기 잠금 (공유) |
//!
//! 레지스트리 내부에는 I/O가 없으므로 모든 임계 구역은 짧고 동기적입니다.
//!
//! ## 사용 예제
//!
//! ```rust
//! use resource_provider::core::provider::{GenericProvider, Provider};
//!
//! let provider = GenericProvider::new();
//! provider.add("primary", 1, false);
//! provider.add("replica", 2, false);
//!
//! assert_eq!(provider.get_default(), Some(1));
//! assert!(provider.set_default("replica"));
//! assert_eq!(provider.get_default(), Some(2));
//! assert!(!provider.set_default("missing"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::core::errors::ProviderResult;

/// 리소스 종류와 무관한 종료 계약
///
/// 서로 다른 종류의 프로바이더(`Provider<Database>`, `Provider<AppLogger>` 등)를
/// 하나의 목록에 담아 일괄 종료할 수 있도록 제네릭 파라미터가 없는 trait으로
/// 분리되어 있습니다.
#[async_trait]
pub trait Shutdown: Send + Sync {
    /// 보관 중인 모든 리소스를 정리합니다.
    ///
    /// 종료는 최종 단계입니다. 호출 이후의 `add`는 정의되지 않은 사용으로 간주합니다.
    async fn shutdown(&self) -> ProviderResult<()>;
}

/// 이름 기반 다중 인스턴스 프로바이더의 공통 계약
///
/// 리소스 종류와 관계없이 `add` / `get` / `get_default` / `set_default` 네 가지 연산과
/// [`Shutdown`]을 동일하게 제공합니다.
pub trait Provider<T>: Shutdown {
    /// 값을 등록하거나 같은 이름의 값을 덮어씁니다.
    ///
    /// `make_default`가 `true`이거나 레지스트리가 비어 있었다면 기본 인스턴스가 됩니다.
    fn add(&self, name: &str, value: T, make_default: bool);

    /// 이름으로 값을 조회합니다. 없으면 `None`.
    fn get(&self, name: &str) -> Option<T>;

    /// 기본 인스턴스를 반환합니다. 한 번도 등록된 적이 없으면 `None`.
    fn get_default(&self) -> Option<T>;

    /// 이미 등록된 이름의 값을 기본 인스턴스로 지정합니다.
    ///
    /// 이름이 없으면 상태를 바꾸지 않고 `false`를 반환합니다.
    fn set_default(&self, name: &str) -> bool;
}

struct Inner<T> {
    container: BTreeMap<String, T>,
    current_default: Option<T>,
}

/// 제네릭 레지스트리 구현체
///
/// 저장되는 값 `T`의 내부는 전혀 들여다보지 않습니다. `get`/`get_default`는
/// 값의 복제본을 돌려주므로, `T`는 `Arc` 기반 클라이언트처럼 복제가 곧
/// 소유권 공유인 핸들 타입을 가정합니다.
pub struct GenericProvider<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    /// 비어 있는 프로바이더를 생성합니다.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                container: BTreeMap::new(),
                current_default: None,
            }),
        }
    }

    /// 이미 만들어진 값들로 프로바이더를 생성합니다.
    ///
    /// 이름의 사전순으로 등록되므로 **사전순으로 가장 앞선 이름**이 기본 인스턴스가
    /// 됩니다. 다른 인스턴스를 기본으로 쓰려면 생성 후 [`Provider::set_default`]를
    /// 호출하세요.
    pub fn with_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let provider = Self::new();
        let ordered: BTreeMap<String, T> = items.into_iter().collect();
        for (name, value) in ordered {
            provider.add(&name, value, false);
        }
        provider
    }

    /// 등록된 인스턴스 수
    pub fn len(&self) -> usize {
        self.read().container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().container.is_empty()
    }

    /// 등록된 이름 목록 (사전순)
    pub fn names(&self) -> Vec<String> {
        self.read().container.keys().cloned().collect()
    }

    /// 하나의 읽기 잠금 아래에서 뜬 `(이름, 값)` 스냅샷 (사전순)
    ///
    /// 종료 어댑터가 잠금을 쥔 채 await 하지 않도록 사용합니다.
    pub fn snapshot(&self) -> Vec<(String, T)> {
        self.read()
            .container
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<HashMap<String, T>> for GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    fn from(items: HashMap<String, T>) -> Self {
        Self::with_items(items)
    }
}

impl<T> From<BTreeMap<String, T>> for GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    fn from(items: BTreeMap<String, T>) -> Self {
        Self::with_items(items)
    }
}

impl<T> Provider<T> for GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    fn add(&self, name: &str, value: T, make_default: bool) {
        let mut inner = self.write();
        if make_default || inner.container.is_empty() {
            inner.current_default = Some(value.clone());
        }
        inner.container.insert(name.to_string(), value);
    }

    fn get(&self, name: &str) -> Option<T> {
        self.read().container.get(name).cloned()
    }

    fn get_default(&self) -> Option<T> {
        self.read().current_default.clone()
    }

    fn set_default(&self, name: &str) -> bool {
        let mut inner = self.write();
        match inner.container.get(name).cloned() {
            Some(value) => {
                inner.current_default = Some(value);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl<T> Shutdown for GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    /// 제네릭 레지스트리는 리소스 의미를 모르므로 아무것도 하지 않습니다.
    async fn shutdown(&self) -> ProviderResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_provider_has_no_default() {
        let provider: GenericProvider<i32> = GenericProvider::new();

        assert!(provider.is_empty());
        assert_eq!(provider.get_default(), None);
        assert_eq!(provider.get("anything"), None);
    }

    #[test]
    fn test_first_add_becomes_default_regardless_of_flag() {
        let provider = GenericProvider::new();
        provider.add("first", 10, false);
        provider.add("second", 20, false);

        assert_eq!(provider.get_default(), Some(10));

        let flagged = GenericProvider::new();
        flagged.add("only", 7, true);
        assert_eq!(flagged.get_default(), Some(7));
    }

    #[test]
    fn test_explicit_default_wins() {
        let provider = GenericProvider::new();
        provider.add("a", 1, false);
        provider.add("b", 2, true);

        assert_eq!(provider.get_default(), Some(2));
        assert_eq!(provider.len(), 2);
    }

    #[test]
    fn test_set_default_contract() {
        let provider = GenericProvider::new();
        provider.add("a", 1, false);
        provider.add("b", 2, false);

        assert!(provider.set_default("b"));
        assert_eq!(provider.get_default(), Some(2));

        assert!(!provider.set_default("missing"));
        assert_eq!(provider.get_default(), Some(2));
    }

    #[test]
    fn test_set_default_on_empty_provider() {
        let provider: GenericProvider<i32> = GenericProvider::new();

        assert!(!provider.set_default("a"));
        assert_eq!(provider.get_default(), None);
    }

    #[test]
    fn test_overwrite_does_not_move_default() {
        let provider = GenericProvider::new();
        provider.add("db", "v1".to_string(), false);
        provider.add("db", "v2".to_string(), false);

        assert_eq!(provider.get("db"), Some("v2".to_string()));
        assert_eq!(provider.get_default(), Some("v1".to_string()));
        assert_eq!(provider.len(), 1);

        provider.add("db", "v3".to_string(), true);
        assert_eq!(provider.get_default(), Some("v3".to_string()));
    }

    #[test]
    fn test_with_items_uses_lexicographically_first_key_as_default() {
        let mut items = HashMap::new();
        items.insert("replica".to_string(), 2);
        items.insert("primary".to_string(), 1);
        items.insert("archive".to_string(), 3);

        let provider = GenericProvider::from(items);

        assert_eq!(provider.get_default(), Some(3));
        assert_eq!(provider.names(), vec!["archive", "primary", "replica"]);
    }

    #[test]
    fn test_snapshot_is_sorted_by_name() {
        let provider = GenericProvider::new();
        provider.add("c", 3, false);
        provider.add("a", 1, false);
        provider.add("b", 2, false);

        let snapshot = provider.snapshot();
        assert_eq!(
            snapshot,
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("c".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_concurrent_add_and_get() {
        let provider = Arc::new(GenericProvider::new());
        for i in 0..8 {
            provider.add(&format!("seed-{}", i), vec![i; 64], false);
        }

        thread::scope(|scope| {
            for writer in 0..8 {
                let provider = Arc::clone(&provider);
                scope.spawn(move || {
                    for n in 0..100 {
                        let name = format!("w{}-{}", writer, n);
                        provider.add(&name, vec![writer * 1000 + n; 64], false);
                    }
                });
            }
            for _ in 0..8 {
                let provider = Arc::clone(&provider);
                scope.spawn(move || {
                    for n in 0..500 {
                        let i = n % 8;
                        let value = provider
                            .get(&format!("seed-{}", i))
                            .expect("seeded value must be present");
                        assert_eq!(value.len(), 64);
                        assert!(value.iter().all(|v| *v == i));

                        if let Some(default) = provider.get_default() {
                            assert_eq!(default.len(), 64);
                        }
                    }
                });
            }
        });

        assert_eq!(provider.len(), 8 + 8 * 100);
        assert_eq!(provider.get_default(), Some(vec![0; 64]));
    }

    #[tokio::test]
    async fn test_generic_shutdown_is_noop() {
        let provider = GenericProvider::new();
        provider.add("a", 1, false);

        assert!(provider.shutdown().await.is_ok());
        assert_eq!(provider.get("a"), Some(1));
    }
}
