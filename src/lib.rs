//! 리소스 프로바이더
//!
//! 이름으로 구분되는 여러 개의 리소스 인스턴스(데이터베이스 연결, 캐시 클라이언트,
//! 로거 등)를 한곳에 모아 관리하는 제네릭 레지스트리입니다.
//!
//! # Features
//!
//! - **이름 기반 조회**: 같은 종류의 인스턴스를 이름으로 등록/조회
//! - **기본 인스턴스**: 이름 없이 꺼내 쓰는 기본값, 언제든 교체 가능
//! - **생성 파이프라인**: `이름 → 파라미터` 매핑 + 팩토리 함수로 일괄 생성
//! - **종류별 종료**: 인스턴스 하나를 닫는 함수를 주입한 어댑터
//! - **JSON 설정**: 섹션 키 단위로 파라미터 디코딩
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ProviderConfig  │ ← JSON 설정 문서
//! └─────────────────┘
//!          │ section("database")
//!          ▼
//! ┌─────────────────┐
//! │    Builder      │ ← 팩토리 호출, fail-fast
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ GenericProvider │ ← 이름 → 인스턴스, 기본 인스턴스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  TypedProvider  │ ← 종류별 close 함수
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  ShutdownGroup  │ ← 등록 역순 일괄 종료
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use resource_provider::bootstrap::Resources;
//! use resource_provider::config::ProviderConfig;
//! use resource_provider::core::{Provider, Shutdown};
//!
//! let config = ProviderConfig::from_env()?;
//! let resources = Resources::from_config(&config)?;
//!
//! let orders = resources.databases.get("orders").ok_or("no orders database")?;
//! let sessions = resources.caches.get_default().ok_or("no cache")?;
//!
//! resources.shutdown().await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod core;
pub mod resources;
pub mod utils;
