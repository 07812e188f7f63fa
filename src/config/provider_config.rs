//! 프로바이더 설정 문서
//!
//! JSON 설정 문서를 한 번 읽어 두고, 섹션 키 단위로 `이름 → 파라미터` 매핑을
//! 디코딩합니다. 디코딩 실패는 어떤 팩토리도 호출되기 전에 반환됩니다.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::errors::{ProviderError, ProviderResult};

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_PATH_ENV: &str = "PROVIDER_CONFIG_PATH";

/// `PROVIDER_CONFIG_PATH`가 없을 때 사용하는 기본 경로
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// 디코딩된 설정 문서
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    root: Value,
}

impl ProviderConfig {
    /// 이미 파싱된 JSON 값으로부터 생성합니다.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// JSON 문자열을 파싱합니다.
    pub fn from_str(json: &str) -> ProviderResult<Self> {
        let root = serde_json::from_str(json)
            .map_err(|source| ProviderError::ConfigParseError { source })?;
        Ok(Self { root })
    }

    /// JSON 설정 파일을 읽습니다.
    pub fn from_file(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ProviderError::ConfigIoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&contents)
    }

    /// `PROVIDER_CONFIG_PATH` (기본값: `config.json`)에서 설정을 읽습니다.
    pub fn from_env() -> ProviderResult<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }

    /// 섹션 키가 존재하는지 확인합니다.
    pub fn contains(&self, key: &str) -> bool {
        self.root.get(key).is_some_and(|value| !value.is_null())
    }

    /// `key` 섹션을 `이름 → U` 매핑으로 디코딩합니다.
    ///
    /// 섹션이 없거나 `null`이면 빈 매핑을 반환합니다.
    pub fn section<U>(&self, key: &str) -> ProviderResult<BTreeMap<String, U>>
    where
        U: DeserializeOwned,
    {
        match self.root.get(key) {
            None | Some(Value::Null) => Ok(BTreeMap::new()),
            Some(value) => BTreeMap::<String, U>::deserialize(value).map_err(|source| {
                ProviderError::ConfigDecodeError {
                    key: key.to_string(),
                    source,
                }
            }),
        }
    }

    /// `key`의 단일 값을 디코딩합니다. 없으면 `None`.
    pub fn get<V>(&self, key: &str) -> ProviderResult<Option<V>>
    where
        V: DeserializeOwned,
    {
        match self.root.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => V::deserialize(value)
                .map(Some)
                .map_err(|source| ProviderError::ConfigDecodeError {
                    key: key.to_string(),
                    source,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Params {
        host: String,
        #[serde(default)]
        port: u16,
    }

    fn sample() -> ProviderConfig {
        ProviderConfig::from_str(
            r#"{
                "database": {
                    "primary": { "host": "db-1", "port": 27017 },
                    "replica": { "host": "db-2" }
                },
                "empty": null,
                "app_name": "orders"
            }"#,
        )
        .expect("valid json")
    }

    #[test]
    fn test_section_decodes_named_params() {
        let section = sample().section::<Params>("database").expect("decodes");

        assert_eq!(section.len(), 2);
        assert_eq!(section["primary"].host, "db-1");
        assert_eq!(section["primary"].port, 27017);
        assert_eq!(section["replica"].port, 0);
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["primary", "replica"]);
    }

    #[test]
    fn test_missing_or_null_section_is_empty() {
        let config = sample();

        assert!(config.section::<Params>("redis").expect("empty").is_empty());
        assert!(config.section::<Params>("empty").expect("empty").is_empty());
        assert!(!config.contains("empty"));
        assert!(config.contains("database"));
    }

    #[test]
    fn test_malformed_section_reports_key() {
        let error = sample()
            .section::<Params>("app_name")
            .expect_err("a string is not a map");

        match error {
            ProviderError::ConfigDecodeError { key, .. } => assert_eq!(key, "app_name"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_get_single_value() {
        let config = sample();

        assert_eq!(
            config.get::<String>("app_name").expect("decodes"),
            Some("orders".to_string())
        );
        assert_eq!(config.get::<String>("missing").expect("decodes"), None);
    }

    #[test]
    fn test_invalid_json_document() {
        let error = ProviderConfig::from_str("{ not json").expect_err("not json");

        assert!(matches!(error, ProviderError::ConfigParseError { .. }));
        assert!(error.to_string().starts_with("Config parse error: "));
        assert!(!error.to_string().contains("key ''"));
    }

    #[test]
    fn test_from_file_missing_path() {
        let error = ProviderConfig::from_file("/nonexistent/provider-config.json")
            .expect_err("file does not exist");

        assert!(matches!(error, ProviderError::ConfigIoError { .. }));
    }
}
