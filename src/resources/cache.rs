//! # Redis 캐시 리소스
//!
//! 이름별 Redis 클라이언트를 만들고 JSON 기반 get/set을 제공합니다.
//!
//! ## 연결 관리
//!
//! 생성 시에는 URL만 검증하고 네트워크 연결을 맺지 않습니다. 첫 명령에서
//! `ConnectionManager` 하나를 만들어 공유 슬롯에 두고, 이후 모든 명령과 복제본이
//! 이를 재사용합니다. `close`는 슬롯을 비워 연결을 해제합니다.
//!
//! ## 지원 토폴로지
//!
//! | 설정 | 결과 |
//! |------|------|
//! | `addrs` 1개 | 단일 노드 (standalone) |
//! | `addrs` 여러 개 | `UnsupportedTopology` |
//! | `master_name` 지정 | `UnsupportedTopology` (sentinel) |
//!
//! ```json
//! {
//!   "redis": {
//!     "session": { "addrs": ["cache-1:6379"], "db": 1 },
//!     "rate_limit": { "addrs": ["cache-2:6379"], "password": "secret" }
//!   }
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::config::ProviderConfig;
use crate::core::adapter::TypedProvider;
use crate::core::errors::{ProviderError, ProviderResult};
use crate::core::provider::GenericProvider;

/// 캐시 프로바이더의 종류 이름
pub const CACHE_KIND: &str = "cache";

/// 캐시 파라미터가 들어 있는 설정 섹션 키
pub const CACHE_SECTION: &str = "redis";

pub const DEFAULT_REDIS_ADDR: &str = "localhost:6379";

/// Redis 연결 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheParams {
    /// `host:port` 또는 `redis://` URL
    pub addrs: Vec<String>,
    /// sentinel 마스터 이름 (지원하지 않음)
    pub master_name: String,
    pub username: String,
    pub password: String,
    pub db: i64,
}

impl Default for CacheParams {
    fn default() -> Self {
        Self {
            addrs: vec![DEFAULT_REDIS_ADDR.to_string()],
            master_name: String::new(),
            username: String::new(),
            password: String::new(),
            db: 0,
        }
    }
}

impl CacheParams {
    /// 단일 노드 파라미터
    pub fn standalone(addr: &str) -> Self {
        Self {
            addrs: vec![addr.to_string()],
            ..Self::default()
        }
    }

    /// 토폴로지를 검증하고 연결 URL을 만듭니다.
    ///
    /// 주소가 이미 `redis://` 또는 `rediss://`로 시작하면 그대로 사용합니다.
    pub fn connection_url(&self) -> ProviderResult<String> {
        if !self.master_name.is_empty() {
            return Err(ProviderError::UnsupportedTopology(format!(
                "sentinel master '{}'",
                self.master_name
            )));
        }

        let addr = match self.addrs.as_slice() {
            [addr] => addr,
            [] => {
                return Err(ProviderError::UnsupportedTopology(
                    "no address configured".to_string(),
                ));
            }
            addrs => {
                return Err(ProviderError::UnsupportedTopology(format!(
                    "cluster of {} nodes",
                    addrs.len()
                )));
            }
        };

        if addr.starts_with("redis://") || addr.starts_with("rediss://") {
            return Ok(addr.clone());
        }

        let auth = match (self.username.as_str(), self.password.as_str()) {
            ("", "") => String::new(),
            ("", password) => format!(":{}@", urlencoding::encode(password)),
            (username, password) => format!(
                "{}:{}@",
                urlencoding::encode(username),
                urlencoding::encode(password)
            ),
        };

        Ok(format!("redis://{}{}/{}", auth, addr, self.db))
    }
}

/// Redis 캐시 클라이언트 래퍼
///
/// 복제본은 같은 연결 슬롯과 같은 닫힘 상태를 공유합니다. 닫힌 뒤의 모든 명령은
/// `ResourceClosed`로 실패합니다.
///
/// ```rust,ignore
/// let redis = caches.get("session").ok_or("no session cache")?;
///
/// redis.set_with_expiry("user:123", &user, 3600).await?;
/// let cached_user: Option<UserCache> = redis.get("user:123").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
    url: String,
    connection: Arc<Mutex<Option<ConnectionManager>>>,
    closed: Arc<AtomicBool>,
}

impl RedisClient {
    /// 파라미터로 클라이언트를 생성합니다. 네트워크 연결은 맺지 않습니다.
    pub fn new(params: CacheParams) -> ProviderResult<Self> {
        let url = params.connection_url()?;
        let client = Client::open(url.as_str())?;

        info!("✅ Redis 클라이언트 준비: {}", redacted(&url));

        Ok(Self {
            client,
            url,
            connection: Arc::new(Mutex::new(None)),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// 단일 노드 주소로 클라이언트를 생성합니다.
    pub fn standalone(addr: &str) -> ProviderResult<Self> {
        Self::new(CacheParams::standalone(addr))
    }

    /// `localhost:6379`에 연결하는 클라이언트를 생성합니다.
    pub fn default_client() -> ProviderResult<Self> {
        Self::new(CacheParams::default())
    }

    /// 비밀번호를 가린 연결 URL
    pub fn url(&self) -> String {
        redacted(&self.url)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// 공유 연결이 만들어져 있는지 확인합니다.
    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    /// PING 명령으로 서버 가용성을 확인합니다.
    pub async fn ping(&self) -> ProviderResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }

    /// 키의 값을 JSON으로 역직렬화해 반환합니다. 키가 없으면 `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> ProviderResult<Option<T>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization failed",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 값을 JSON으로 직렬화해 저장합니다. 기존 값은 덮어씁니다.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> ProviderResult<()> {
        let json = to_json(value)?;
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, json).await?;
        Ok(())
    }

    /// 만료 시간(초)과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> ProviderResult<()> {
        let json = to_json(value)?;
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, json, seconds).await?;
        Ok(())
    }

    /// 키를 삭제합니다. 키가 없어도 성공입니다.
    pub async fn del(&self, key: &str) -> ProviderResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }

    /// 공유 연결을 해제하고 클라이언트를 닫습니다.
    ///
    /// 두 번째 호출은 `ResourceClosed`를 반환합니다. 진행 중인 명령이 쥐고 있는
    /// 연결 복제본은 해당 명령이 끝나면 함께 해제됩니다.
    pub async fn close(&self) -> ProviderResult<()> {
        let mut slot = self.connection.lock().await;
        if self.closed.swap(true, Ordering::SeqCst) {
            warn!("⚠️ redis client '{}' already closed", self.url());
            return Err(self.closed_error());
        }

        let released = slot.take().is_some();
        info!(
            "🛑 Redis 클라이언트 종료: {} (connection released: {})",
            self.url(),
            released
        );
        Ok(())
    }

    async fn connection(&self) -> ProviderResult<ConnectionManager> {
        let mut slot = self.connection.lock().await;
        if self.is_closed() {
            return Err(self.closed_error());
        }

        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        debug!("opening redis connection: {}", self.url());
        let conn = self.client.get_connection_manager().await?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    fn closed_error(&self) -> ProviderError {
        ProviderError::ResourceClosed(format!("redis client '{}'", self.url()))
    }
}

fn to_json<T: Serialize>(value: &T) -> ProviderResult<String> {
    let json = serde_json::to_string(value).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Serialization failed",
            e.to_string(),
        ))
    })?;
    Ok(json)
}

fn redacted(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => {
            format!("{}***{}", &url[..scheme + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// 캐시 프로바이더. 종료 시 모든 클라이언트를 닫습니다.
pub type CacheProvider = TypedProvider<RedisClient>;

pub fn cache_provider(registry: GenericProvider<RedisClient>) -> CacheProvider {
    TypedProvider::new(CACHE_KIND, Arc::new(registry), |client: RedisClient| async move {
        client.close().await
    })
}

pub fn cache_provider_from_params<I>(params: I) -> ProviderResult<CacheProvider>
where
    I: IntoIterator<Item = (String, CacheParams)>,
{
    let registry = GenericProvider::try_from_params(RedisClient::new, params)?;
    Ok(cache_provider(registry))
}

/// 설정의 `redis` 섹션으로 프로바이더를 생성합니다.
pub fn cache_provider_from_config(config: &ProviderConfig) -> ProviderResult<CacheProvider> {
    let registry = GenericProvider::try_from_config(config, CACHE_SECTION, RedisClient::new)?;
    Ok(cache_provider(registry))
}
