//! 평가 도메인 모델.
//!
//! - [`provider`]: 평가 제공자와 제공자 집합
//! - [`rating`]: 제공자 단일 호출 결과
//! - [`composite`]: 종목별 종합 평가와 순위 목록

pub mod composite;
pub mod provider;
pub mod rating;

pub use composite::{CompositeRating, ProviderScore, RankedList};
pub use provider::{Provider, ProviderSet};
pub use rating::{ProviderRating, RatingOutcome, RatingStatus, RawRating};
