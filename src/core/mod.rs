//! # Core Provider Module
//!
//! 리소스 종류와 무관한 프로바이더 핵심 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`provider`] - 이름 기반 다중 인스턴스 레지스트리
//! - **Provider<T>**: `add` / `get` / `get_default` / `set_default` 공통 계약
//! - **Shutdown**: 리소스 종류와 무관한 종료 계약
//! - **GenericProvider<T>**: `RwLock` 기반 구현체
//!
//! ### [`builder`] - 생성 파이프라인
//! - 이름 → 파라미터 매핑과 팩토리 함수로 프로바이더를 채웁니다
//! - 실패 가능한 팩토리는 fail-fast
//!
//! ### [`adapter`] - 리소스 종류별 종료 어댑터
//! - **TypedProvider<T>**: 레지스트리 + 주입된 close 함수
//!
//! ### [`lifecycle`] - 종류를 넘나드는 일괄 종료
//! - **ShutdownGroup**: 등록 역순 종료
//!
//! ### [`errors`] - 통합 에러 처리
//! - **ProviderError**: 설정/생성/종료 에러 분류
//!
//! ## 생명주기
//!
//! ```text
//! Empty ──add*──▶ Populated ──set_default?──▶ Populated
//!                     │
//!                     ▼
//!               ShuttingDown ──▶ Closed (최종, 실패 시 일부 인스턴스는 열린 채로 남음)
//! ```
//!
//! `Closed`에서 `Populated`로 돌아가는 전이는 없습니다. 종료 후에는
//! 프로바이더를 버리고 새로 생성하세요.

pub mod adapter;
pub mod builder;
pub mod errors;
pub mod lifecycle;
pub mod provider;

pub use adapter::*;
pub use errors::*;
pub use lifecycle::*;
pub use provider::*;
