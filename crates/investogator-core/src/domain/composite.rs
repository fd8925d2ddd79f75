//! 종목별 종합 평가와 순위 목록.

use serde::Serialize;

use super::provider::Provider;
use super::rating::ProviderRating;
use crate::normalize::NormalizedScore;
use crate::types::Ticker;

/// 제공자 하나의 평가 결과와 정규화 점수.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderScore {
    #[serde(flatten)]
    pub rating: ProviderRating,
    pub score: NormalizedScore,
}

/// 한 종목의 종합 평가.
///
/// `total`은 항목별 정규화 점수의 합이며 `[0, 5 × 항목 수]` 범위를 벗어나지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeRating {
    pub ticker: Ticker,
    pub components: Vec<ProviderScore>,
    pub total: u32,
}

impl CompositeRating {
    /// 항목 목록으로 종합 평가 생성 (합계 자동 계산)
    pub fn new(ticker: Ticker, components: Vec<ProviderScore>) -> Self {
        let total = components.iter().map(|c| c.score.value() as u32).sum();
        Self {
            ticker,
            components,
            total,
        }
    }

    /// 가능한 최대 합계
    pub fn max_total(&self) -> u32 {
        NormalizedScore::MAX.value() as u32 * self.components.len() as u32
    }

    /// 특정 제공자의 항목 조회
    pub fn component(&self, provider: Provider) -> Option<&ProviderScore> {
        self.components.iter().find(|c| c.rating.provider == provider)
    }

    /// 평가 값을 얻은 항목 수
    pub fn ok_count(&self) -> usize {
        self.components.iter().filter(|c| c.rating.is_ok()).count()
    }
}

/// 합계 내림차순으로 정렬된 종합 평가 목록.
///
/// 동점이면 입력 순서를 유지합니다 (안정 정렬).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedList(Vec<CompositeRating>);

impl RankedList {
    /// 입력 순서대로 집계된 평가를 정렬하여 순위 목록 생성
    pub fn from_aggregated(mut ratings: Vec<CompositeRating>) -> Self {
        // sort_by는 안정 정렬
        ratings.sort_by(|a, b| b.total.cmp(&a.total));
        Self(ratings)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompositeRating> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RankedList {
    type Item = CompositeRating;
    type IntoIter = std::vec::IntoIter<CompositeRating>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a CompositeRating;
    type IntoIter = std::slice::Iter<'a, CompositeRating>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
