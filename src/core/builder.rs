//! # Construction Pipeline
//!
//! 이름 → 파라미터 매핑과 팩토리 함수로부터 [`GenericProvider`]를 채워 넣는
//! 생성 함수 모음입니다.
//!
//! | 함수 | 팩토리 | 공유 보조값 | 실패 가능 |
//! |------|--------|-------------|-----------|
//! | [`GenericProvider::from_params`] | `FnMut(U) -> T` | - | - |
//! | [`GenericProvider::try_from_params`] | `FnMut(U) -> Result<T, E>` | - | ✓ |
//! | [`GenericProvider::from_params_with`] | `FnMut(U, &A) -> T` | ✓ | - |
//! | [`GenericProvider::try_from_params_with`] | `FnMut(U, &A) -> Result<T, E>` | ✓ | ✓ |
//! | `*_config*` 변형 | 위와 동일 | | 설정 디코딩 실패 포함 |
//!
//! ## 생성 순서와 기본 인스턴스
//!
//! 파라미터는 이름의 **사전순**으로 방문합니다. 레지스트리는 비어 있는 상태에서
//! 시작하므로 사전순으로 가장 앞선 이름이 기본 인스턴스가 됩니다.
//! 다른 인스턴스를 기본으로 쓰려면 생성 직후 `set_default`를 호출하세요.
//!
//! ## Fail-fast
//!
//! 실패 가능한 팩토리가 한 번이라도 에러를 반환하면 생성은 즉시 중단되고
//! [`ProviderError::ConstructionError`](crate::core::errors::ProviderError::ConstructionError)
//! 하나만 반환됩니다. 성공한 일부만 담긴 레지스트리는 돌려주지 않습니다.
//! 이미 만들어진 인스턴스는 그대로 drop 됩니다.
//!
//! ## 사용 예제
//!
//! ```rust
//! use std::collections::HashMap;
//! use resource_provider::core::provider::{GenericProvider, Provider};
//!
//! let mut params = HashMap::new();
//! params.insert("primary".to_string(), 5432u16);
//! params.insert("replica".to_string(), 5433u16);
//!
//! let provider = GenericProvider::try_from_params(
//!     |port: u16| -> Result<String, std::io::Error> { Ok(format!("localhost:{}", port)) },
//!     params,
//! )?;
//!
//! assert_eq!(provider.get_default(), Some("localhost:5432".to_string()));
//! # Ok::<(), resource_provider::core::errors::ProviderError>(())
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::config::ProviderConfig;
use crate::core::errors::{BoxError, ErrorContext, ProviderResult};
use crate::core::provider::GenericProvider;

fn ordered<U, I>(params: I) -> BTreeMap<String, U>
where
    I: IntoIterator<Item = (String, U)>,
{
    params.into_iter().collect()
}

impl<T> GenericProvider<T>
where
    T: Clone + Send + Sync,
{
    /// 실패하지 않는 팩토리로 프로바이더를 생성합니다.
    pub fn from_params<U, F, I>(mut factory: F, params: I) -> Self
    where
        F: FnMut(U) -> T,
        I: IntoIterator<Item = (String, U)>,
    {
        Self::with_items(
            ordered(params)
                .into_iter()
                .map(|(name, param)| (name, factory(param))),
        )
    }

    /// 실패할 수 있는 팩토리로 프로바이더를 생성합니다.
    ///
    /// 첫 번째 실패에서 중단하며, 실패한 이름이 담긴 `ConstructionError`를 반환합니다.
    pub fn try_from_params<U, E, F, I>(mut factory: F, params: I) -> ProviderResult<Self>
    where
        F: FnMut(U) -> Result<T, E>,
        E: Into<BoxError>,
        I: IntoIterator<Item = (String, U)>,
    {
        let params = ordered(params);
        let mut built = Vec::with_capacity(params.len());
        for (name, param) in params {
            let item = factory(param).construction_context(&name)?;
            built.push((name, item));
        }
        Ok(Self::with_items(built))
    }

    /// 모든 팩토리 호출에 같은 보조값(예: 공용 로거)을 넘겨 프로바이더를 생성합니다.
    pub fn from_params_with<U, A, F, I>(mut factory: F, params: I, aux: &A) -> Self
    where
        F: FnMut(U, &A) -> T,
        I: IntoIterator<Item = (String, U)>,
    {
        Self::with_items(
            ordered(params)
                .into_iter()
                .map(|(name, param)| (name, factory(param, aux))),
        )
    }

    /// 공유 보조값을 받는 실패 가능한 팩토리로 프로바이더를 생성합니다.
    pub fn try_from_params_with<U, A, E, F, I>(
        mut factory: F,
        params: I,
        aux: &A,
    ) -> ProviderResult<Self>
    where
        F: FnMut(U, &A) -> Result<T, E>,
        E: Into<BoxError>,
        I: IntoIterator<Item = (String, U)>,
    {
        Self::try_from_params(|param| factory(param, aux), params)
    }

    /// 설정의 `key` 섹션을 디코딩한 뒤 [`from_params`](Self::from_params)로 생성합니다.
    pub fn from_config<U, F>(config: &ProviderConfig, key: &str, factory: F) -> ProviderResult<Self>
    where
        U: DeserializeOwned,
        F: FnMut(U) -> T,
    {
        let params = config.section::<U>(key)?;
        Ok(Self::from_params(factory, params))
    }

    /// 설정의 `key` 섹션을 디코딩한 뒤 [`try_from_params`](Self::try_from_params)로 생성합니다.
    pub fn try_from_config<U, E, F>(
        config: &ProviderConfig,
        key: &str,
        factory: F,
    ) -> ProviderResult<Self>
    where
        U: DeserializeOwned,
        F: FnMut(U) -> Result<T, E>,
        E: Into<BoxError>,
    {
        let params = config.section::<U>(key)?;
        Self::try_from_params(factory, params)
    }

    /// 설정의 `key` 섹션을 디코딩한 뒤 [`from_params_with`](Self::from_params_with)로 생성합니다.
    pub fn from_config_with<U, A, F>(
        config: &ProviderConfig,
        key: &str,
        factory: F,
        aux: &A,
    ) -> ProviderResult<Self>
    where
        U: DeserializeOwned,
        F: FnMut(U, &A) -> T,
    {
        let params = config.section::<U>(key)?;
        Ok(Self::from_params_with(factory, params, aux))
    }

    /// 설정의 `key` 섹션을 디코딩한 뒤 [`try_from_params_with`](Self::try_from_params_with)로 생성합니다.
    pub fn try_from_config_with<U, A, E, F>(
        config: &ProviderConfig,
        key: &str,
        factory: F,
        aux: &A,
    ) -> ProviderResult<Self>
    where
        U: DeserializeOwned,
        F: FnMut(U, &A) -> Result<T, E>,
        E: Into<BoxError>,
    {
        let params = config.section::<U>(key)?;
        Self::try_from_params_with(factory, params, aux)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ProviderError;
    use crate::core::provider::Provider;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    fn endpoint(host: &str, port: u16) -> Endpoint {
        Endpoint {
            host: host.to_string(),
            port,
        }
    }

    fn fallible(endpoint: Endpoint) -> Result<String, String> {
        if endpoint.port == 0 {
            Err(format!("invalid port for {}", endpoint.host))
        } else {
            Ok(format!("{}:{}", endpoint.host, endpoint.port))
        }
    }

    #[test]
    fn test_from_params_builds_every_key() {
        let mut params = HashMap::new();
        params.insert("replica".to_string(), endpoint("db-2", 5433));
        params.insert("primary".to_string(), endpoint("db-1", 5432));

        let provider =
            GenericProvider::from_params(|e: Endpoint| format!("{}:{}", e.host, e.port), params);

        assert_eq!(provider.len(), 2);
        assert_eq!(provider.get("replica"), Some("db-2:5433".to_string()));
        assert_eq!(provider.get_default(), Some("db-1:5432".to_string()));
    }

    #[test]
    fn test_from_params_with_empty_mapping() {
        let params: HashMap<String, Endpoint> = HashMap::new();
        let provider = GenericProvider::from_params(|e: Endpoint| e.port, params);

        assert!(provider.is_empty());
        assert_eq!(provider.get_default(), None);
    }

    #[test]
    fn test_try_from_params_fails_fast() {
        let mut params = HashMap::new();
        params.insert("a".to_string(), endpoint("a", 1));
        params.insert("b".to_string(), endpoint("b", 0));
        params.insert("c".to_string(), endpoint("c", 3));

        let mut calls = Vec::new();
        let result = GenericProvider::try_from_params(
            |e: Endpoint| {
                calls.push(e.host.clone());
                fallible(e)
            },
            params,
        );

        match result {
            Err(ProviderError::ConstructionError { name, source }) => {
                assert_eq!(name, "b");
                assert_eq!(source.to_string(), "invalid port for b");
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("construction should fail"),
        }
        assert_eq!(calls, vec!["a", "b"]);
    }

    #[test]
    fn test_try_from_params_success() {
        let params = vec![
            ("primary".to_string(), endpoint("db-1", 1)),
            ("replica".to_string(), endpoint("db-2", 2)),
        ];

        let provider = GenericProvider::try_from_params(fallible, params).expect("should build");

        assert_eq!(provider.names(), vec!["primary", "replica"]);
        assert_eq!(provider.get_default(), Some("db-1:1".to_string()));
    }

    #[test]
    fn test_factories_with_shared_aux_value() {
        let prefix = "tenant-a".to_string();
        let params = vec![("x".to_string(), 1u32), ("y".to_string(), 2u32)];

        let provider = GenericProvider::from_params_with(
            |n: u32, prefix: &String| format!("{}/{}", prefix, n),
            params.clone(),
            &prefix,
        );
        assert_eq!(provider.get("y"), Some("tenant-a/2".to_string()));

        let failing = GenericProvider::<String>::try_from_params_with(
            |n: u32, prefix: &String| {
                if n == 2 {
                    Err(std::io::Error::other(format!("{} refused {}", prefix, n)))
                } else {
                    Ok(format!("{}/{}", prefix, n))
                }
            },
            params,
            &prefix,
        );
        let error = failing.err().expect("second factory call fails");
        assert_eq!(error.resource_name(), Some("y"));
    }

    #[test]
    fn test_from_config_variants() {
        let config = ProviderConfig::from_str(
            r#"{
                "endpoints": {
                    "primary": { "host": "db-1", "port": 5432 },
                    "broken":  { "host": "db-0", "port": 0 }
                }
            }"#,
        )
        .expect("valid json");

        let provider = GenericProvider::from_config(&config, "endpoints", |e: Endpoint| e.port)
            .expect("decodes");
        assert_eq!(provider.get("primary"), Some(5432));
        // "broken" < "primary"
        assert_eq!(provider.get_default(), Some(0));

        let failing = GenericProvider::try_from_config(&config, "endpoints", fallible);
        assert!(matches!(
            failing,
            Err(ProviderError::ConstructionError { ref name, .. }) if name == "broken"
        ));

        let tag = "cfg".to_string();
        let with_aux = GenericProvider::from_config_with(
            &config,
            "endpoints",
            |e: Endpoint, tag: &String| format!("{}:{}", tag, e.host),
            &tag,
        )
        .expect("decodes");
        assert_eq!(with_aux.get("primary"), Some("cfg:db-1".to_string()));

        let missing = GenericProvider::try_from_config_with(
            &config,
            "unknown_section",
            |e: Endpoint, _: &String| fallible(e),
            &tag,
        )
        .expect("missing section is empty");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_config_decode_error_happens_before_construction() {
        let config = ProviderConfig::from_str(r#"{ "endpoints": { "a": { "host": 1 } } }"#)
            .expect("valid json");

        let mut called = false;
        let result = GenericProvider::from_config(&config, "endpoints", |e: Endpoint| {
            called = true;
            e.port
        });

        assert!(matches!(result, Err(ProviderError::ConfigDecodeError { .. })));
        assert!(!called);
    }
}
