//! # Resource Kinds
//!
//! 프로바이더에 담기는 구체적인 리소스 종류들입니다. 각 종류는 세 가지를 제공합니다.
//!
//! 1. `serde`로 디코딩되는 생성 파라미터 (생략된 필드는 기본값)
//! 2. 파라미터를 받아 인스턴스를 만드는 팩토리
//! 3. 인스턴스 하나를 닫는 close 함수를 주입한 `TypedProvider` 생성 함수
//!
//! | 종류 | 설정 섹션 | 인스턴스 | 종료 연산 |
//! |------|-----------|----------|-----------|
//! | `logger` | `logger` | [`AppLogger`] | `sync` |
//! | `database` | `database` | [`Database`] | `close` |
//! | `cache` | `redis` | [`RedisClient`] | `close` |

pub mod cache;
pub mod database;
pub mod logger;

pub use cache::{CacheParams, CacheProvider, RedisClient};
pub use database::{Database, DatabaseParams, DatabaseProvider};
pub use logger::{AppLogger, LoggerParams, LoggerProvider};
