//! Investogator CLI 구성 요소.
//!
//! - 설정에서 fetcher, 어댑터, 엔진을 조립하는 `AppContext`
//! - 명령별 실행 함수
//! - 텍스트/JSON 출력 렌더링

pub mod commands;
pub mod context;
pub mod render;

pub use context::AppContext;
pub use render::OutputFormat;
