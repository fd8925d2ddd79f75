//! # Investogator Core
//!
//! 평가 엔진 전반에서 공유하는 도메인 모델과 기반 모듈을 제공합니다.
//!
//! - 티커, 평가 제공자, 제공자별 평가 결과 타입
//! - 제공자 고유 척도를 0~5 공통 척도로 변환하는 정규화기
//! - 진단 이벤트 싱크
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod types;

pub use config::*;
pub use diagnostics::{Diagnostic, DiagnosticsSink, MemorySink, TracingSink};
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use normalize::{
    normalize, validate_scale_tables, NormalizedScore, StarRating, SustainabilityTier,
    UnmappedValue, ZacksRank,
};
pub use types::*;
