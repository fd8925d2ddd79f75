//! 평가 제공자 정의.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// 외부 평가 제공자.
///
/// 선언 순서가 표준 순서이며, 종합 평가의 항목별 내역은 항상 이 순서로 정렬됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// Zacks ETF Rank (1 = Strong Buy ~ 5 = Strong Sell 서열 텍스트)
    ZacksRank,
    /// Morningstar 별점 (0~5개)
    MorningstarRating,
    /// Morningstar 지속가능성 등급 (HIGH ~ LOW)
    MorningstarSustainability,
}

impl Provider {
    /// 모든 제공자 (표준 순서)
    pub const ALL: [Provider; 3] = [
        Provider::ZacksRank,
        Provider::MorningstarRating,
        Provider::MorningstarSustainability,
    ];

    /// CLI/설정에서 사용하는 식별자
    pub fn slug(&self) -> &'static str {
        match self {
            Self::ZacksRank => "zacks",
            Self::MorningstarRating => "morningstar",
            Self::MorningstarSustainability => "sustainability",
        }
    }

    /// 사람이 읽기 쉬운 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ZacksRank => "Zacks",
            Self::MorningstarRating => "Morningstar",
            Self::MorningstarSustainability => "Morningstar Sustainability",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Provider {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zacks" | "zacks-rank" | "ordinal" => Ok(Self::ZacksRank),
            "morningstar" | "morningstar-rating" | "ms" | "stars" => Ok(Self::MorningstarRating),
            "sustainability" | "morningstar-sustainability" | "esg" => {
                Ok(Self::MorningstarSustainability)
            }
            _ => Err(RatingError::InvalidInput(format!(
                "Unknown provider: {}. Supported: zacks, morningstar, sustainability",
                s
            ))),
        }
    }
}

/// 평가에 사용할 제공자 집합.
///
/// 요청 순서와 무관하게 표준 순서로 순회합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSet(BTreeSet<Provider>);

impl ProviderSet {
    /// 주어진 제공자들로 집합 생성 (중복 제거)
    pub fn new(providers: impl IntoIterator<Item = Provider>) -> Self {
        Self(providers.into_iter().collect())
    }

    /// 모든 제공자
    pub fn all() -> Self {
        Self::new(Provider::ALL)
    }

    /// 단일 제공자
    pub fn single(provider: Provider) -> Self {
        Self::new([provider])
    }

    /// 표준 순서 순회
    pub fn iter(&self) -> impl Iterator<Item = Provider> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.0.contains(&provider)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 이 집합으로 얻을 수 있는 최대 합계 점수 (5 × 제공자 수)
    pub fn max_total(&self) -> u32 {
        crate::normalize::NormalizedScore::MAX.value() as u32 * self.0.len() as u32
    }
}

impl Default for ProviderSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Provider> for ProviderSet {
    fn from_iter<T: IntoIterator<Item = Provider>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("zacks".parse::<Provider>().unwrap(), Provider::ZacksRank);
        assert_eq!("MS".parse::<Provider>().unwrap(), Provider::MorningstarRating);
        assert_eq!(
            " Sustainability ".parse::<Provider>().unwrap(),
            Provider::MorningstarSustainability
        );
        assert!("yahoo".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_set_canonical_order() {
        let set = ProviderSet::new([
            Provider::MorningstarSustainability,
            Provider::ZacksRank,
            Provider::ZacksRank,
        ]);

        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![Provider::ZacksRank, Provider::MorningstarSustainability]
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.max_total(), 10);
    }

    #[test]
    fn test_provider_set_all() {
        let set = ProviderSet::all();
        assert_eq!(set.len(), 3);
        assert_eq!(set.max_total(), 15);
        assert!(ProviderSet::new([]).is_empty());
        assert_eq!(ProviderSet::new([]).max_total(), 0);
    }
}
