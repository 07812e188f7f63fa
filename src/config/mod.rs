//! # Configuration Module
//!
//! 프로바이더 생성에 필요한 설정을 관리하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경(프로파일) 감지
//! - [`provider_config`] - JSON 설정 문서를 이름 → 파라미터 매핑으로 디코딩
//!
//! ## 설정 문서 예시
//!
//! ```json
//! {
//!   "logger": {
//!     "app":   { "log_name": "logs/app.log", "log_level": "info", "tag": "app" }
//!   },
//!   "database": {
//!     "primary": { "host": "db-1", "port": 27017, "database": "orders" },
//!     "replica": { "host": "db-2", "port": 27017, "database": "orders" }
//!   },
//!   "redis": {
//!     "session": { "addrs": ["localhost:6379"], "db": 1 }
//!   }
//! }
//! ```
//!
//! 각 섹션의 값은 해당 리소스 종류의 파라미터 구조체로 디코딩되며,
//! 생략된 필드는 파라미터 구조체의 `Default` 값을 따릅니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export PROVIDER_CONFIG_PATH="config.json"   # 설정 파일 경로 (기본값: config.json)
//! export ENVIRONMENT="development"            # development, test, staging, production
//! export PROFILE="dev"                        # .env.dev / .env.prod 선택
//! ```

pub mod data_config;
pub mod provider_config;

pub use data_config::*;
pub use provider_config::*;
