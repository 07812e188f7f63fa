//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`display_terminal`] - 초기화 과정 터미널 출력 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use resource_provider::utils::display_terminal::print_boxed_title;
//!
//! print_boxed_title("INITIALIZING PROVIDERS");
//! ```

pub mod display_terminal;
