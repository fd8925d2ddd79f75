//! 평가 집계 및 순위 엔진.
//!
//! - `RatingAggregator`: 한 종목에 대해 요청된 제공자를 모두 조회하고
//!   정규화 점수를 합산합니다.
//! - `RankingEngine`: 여러 종목을 집계해 합계 내림차순으로 정렬합니다.

pub mod aggregator;
pub mod error;
pub mod ranking;

pub use aggregator::{AggregatorConfig, RatingAggregator};
pub use error::EngineError;
pub use ranking::{RankStats, RankingEngine};
