//! Database Connection Resource
//!
//! 이름별 MongoDB 연결 핸들을 만드는 리소스 모듈입니다.
//! 파라미터로부터 클라이언트를 구성하며, 생성 시점에는 네트워크 I/O를 하지 않습니다.
//! 실제 연결은 첫 명령이나 [`Database::ping`] 호출 시점에 맺어집니다.
//!
//! # 설정 예시
//!
//! ```json
//! {
//!   "database": {
//!     "primary": { "host": "db-1", "port": 27017, "database": "orders" },
//!     "analytics": { "host": "db-2", "user": "reader", "password": "secret" }
//!   }
//! }
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! let databases = database_provider_from_config(&config)?;
//! let primary = databases.get_default().ok_or("no database")?;
//! let users = primary.get_database().collection::<User>("users");
//!
//! databases.shutdown().await?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use crate::config::ProviderConfig;
use crate::core::adapter::TypedProvider;
use crate::core::errors::{ProviderError, ProviderResult};
use crate::core::provider::GenericProvider;
use crate::resources::logger::AppLogger;

pub const DRIVER_MONGODB: &str = "mongodb";
pub const DRIVER_MONGO_SHORTEN: &str = "mongo";

/// 데이터베이스 프로바이더의 종류 이름
pub const DATABASE_KIND: &str = "database";

/// 데이터베이스 파라미터가 들어 있는 설정 섹션 키
pub const DATABASE_SECTION: &str = "database";

/// 데이터베이스 연결 파라미터
///
/// `user`가 비어 있으면 인증 정보 없이 연결합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseParams {
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub app_name: String,
}

impl Default for DatabaseParams {
    fn default() -> Self {
        Self {
            driver: DRIVER_MONGODB.to_string(),
            host: "localhost".to_string(),
            port: 27017,
            user: String::new(),
            password: String::new(),
            database: "test".to_string(),
            app_name: "resource_provider".to_string(),
        }
    }
}

impl DatabaseParams {
    /// 드라이버 이름을 검증하고 MongoDB 클라이언트 옵션을 구성합니다.
    pub fn client_options(&self) -> ProviderResult<ClientOptions> {
        match self.driver.to_lowercase().as_str() {
            DRIVER_MONGODB | DRIVER_MONGO_SHORTEN => {}
            _ => return Err(ProviderError::UnsupportedDriver(self.driver.clone())),
        }

        let mut options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: self.host.clone(),
                port: Some(self.port),
            }])
            .build();

        if !self.app_name.is_empty() {
            options.app_name = Some(self.app_name.clone());
        }

        if !self.user.is_empty() {
            options.credential = Some(
                Credential::builder()
                    .username(self.user.clone())
                    .password(self.password.clone())
                    .build(),
            );
        }

        Ok(options)
    }
}

/// MongoDB 데이터베이스 연결 래퍼
///
/// 복제본은 같은 클라이언트와 같은 닫힘 상태를 공유합니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
    closed: Arc<AtomicBool>,
    logger: Option<AppLogger>,
}

impl Database {
    /// 파라미터로 데이터베이스 핸들을 생성합니다.
    ///
    /// MongoDB 클라이언트는 백그라운드 작업을 tokio 런타임에 띄우므로 런타임 안에서
    /// 호출해야 합니다. 런타임 밖이면 `RuntimeUnavailable`을 반환합니다.
    pub fn connect(params: DatabaseParams) -> ProviderResult<Self> {
        let options = params.client_options()?;
        Handle::try_current().map_err(|e| {
            ProviderError::RuntimeUnavailable(format!("database '{}': {}", params.database, e))
        })?;
        let client = Client::with_options(options)?;

        info!(
            "✅ MongoDB 클라이언트 준비: {}:{}/{}",
            params.host, params.port, params.database
        );

        Ok(Self {
            client,
            database_name: params.database,
            closed: Arc::new(AtomicBool::new(false)),
            logger: None,
        })
    }

    /// 공유 로거를 붙여 데이터베이스 핸들을 생성합니다.
    ///
    /// 로거는 `database.<이름>` 태그로 복제되어 연결 이벤트를 기록합니다.
    pub fn connect_with_logger(params: DatabaseParams, logger: &AppLogger) -> ProviderResult<Self> {
        let tagged = logger.with_tag(&format!("database.{}", params.database));
        let mut database = Self::connect(params)?;
        tagged.info("database handle ready");
        database.logger = Some(tagged);
        Ok(database)
    }

    /// 실제 작업에 사용할 `mongodb::Database`를 반환합니다.
    ///
    /// ```rust,ignore
    /// let users_collection = database.get_database().collection::<User>("users");
    /// ```
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn logger(&self) -> Option<&AppLogger> {
        self.logger.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// 서버에 `ping` 명령을 보내 연결 상태를 확인합니다.
    pub async fn ping(&self) -> ProviderResult<()> {
        self.ensure_open()?;
        self.get_database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// 클라이언트를 종료합니다. 두 번째 호출은 `ResourceClosed`를 반환합니다.
    pub async fn close(&self) -> ProviderResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            warn!("⚠️ database '{}' already closed", self.database_name);
            return Err(ProviderError::ResourceClosed(format!(
                "database '{}'",
                self.database_name
            )));
        }

        self.client.clone().shutdown().await;

        if let Some(logger) = &self.logger {
            logger.info("database handle closed");
        }
        info!("🛑 MongoDB 연결 종료: {}", self.database_name);
        Ok(())
    }

    fn ensure_open(&self) -> ProviderResult<()> {
        if self.is_closed() {
            return Err(ProviderError::ResourceClosed(format!(
                "database '{}'",
                self.database_name
            )));
        }
        Ok(())
    }
}

/// 데이터베이스 프로바이더. 종료 시 모든 클라이언트를 닫습니다.
pub type DatabaseProvider = TypedProvider<Database>;

/// 이미 만들어진 데이터베이스 레지스트리를 프로바이더로 감쌉니다.
pub fn database_provider(registry: GenericProvider<Database>) -> DatabaseProvider {
    TypedProvider::new(DATABASE_KIND, Arc::new(registry), |db: Database| async move {
        db.close().await
    })
}

pub fn database_provider_from_params<I>(params: I) -> ProviderResult<DatabaseProvider>
where
    I: IntoIterator<Item = (String, DatabaseParams)>,
{
    let registry = GenericProvider::try_from_params(Database::connect, params)?;
    Ok(database_provider(registry))
}

/// 모든 인스턴스가 같은 로거를 공유하도록 생성합니다.
pub fn database_provider_with_logger<I>(
    params: I,
    logger: &AppLogger,
) -> ProviderResult<DatabaseProvider>
where
    I: IntoIterator<Item = (String, DatabaseParams)>,
{
    let registry =
        GenericProvider::try_from_params_with(Database::connect_with_logger, params, logger)?;
    Ok(database_provider(registry))
}

/// 설정의 `database` 섹션으로 프로바이더를 생성합니다.
pub fn database_provider_from_config(config: &ProviderConfig) -> ProviderResult<DatabaseProvider> {
    let registry = GenericProvider::try_from_config(config, DATABASE_SECTION, Database::connect)?;
    Ok(database_provider(registry))
}

pub fn database_provider_from_config_with_logger(
    config: &ProviderConfig,
    logger: &AppLogger,
) -> ProviderResult<DatabaseProvider> {
    let registry = GenericProvider::try_from_config_with(
        config,
        DATABASE_SECTION,
        Database::connect_with_logger,
        logger,
    )?;
    Ok(database_provider(registry))
}
