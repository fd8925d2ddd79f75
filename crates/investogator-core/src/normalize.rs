//! 척도 정규화.
//!
//! 제공자마다 다른 평가 척도를 0~5 정수 공통 척도로 변환합니다.
//! 높을수록 좋은 평가이며 0은 "평가 없음/사용 불가"를 뜻합니다.
//!
//! | 제공자 | 원시 값 | 공통 점수 |
//! |---|---|---|
//! | Zacks | 1 (Strong Buy) ~ 5 (Strong Sell) | 5 ~ 1 (역순) |
//! | Morningstar | 별 0~5개 | 그대로 |
//! | Sustainability | HIGH / ABOVE AVERAGE / AVERAGE / BELOW AVERAGE / LOW / NO RATING | 5 / 4 / 3 / 2 / 1 / 0 |

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::domain::{Provider, ProviderRating, RawRating};
use crate::error::RatingError;

/// 0~5 범위의 공통 척도 점수.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedScore(u8);

impl NormalizedScore {
    pub const MIN: NormalizedScore = NormalizedScore(0);
    pub const MAX: NormalizedScore = NormalizedScore(5);

    /// 범위를 벗어나면 `None`
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for NormalizedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 척도 테이블에 없는 원시 값.
///
/// 어댑터가 형식을 검증했더라도 제공자 형식이 바뀌면 발생할 수 있으며,
/// 조용히 0점으로 처리하지 않고 별도 결과로 드러냅니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider} 척도에 없는 값: '{value}'")]
pub struct UnmappedValue {
    pub provider: Provider,
    pub value: String,
}

/// Zacks ETF Rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZacksRank {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl ZacksRank {
    /// 서열 1(최선) → 5(최악) 순서
    pub const ALL: [ZacksRank; 5] = [
        ZacksRank::StrongBuy,
        ZacksRank::Buy,
        ZacksRank::Hold,
        ZacksRank::Sell,
        ZacksRank::StrongSell,
    ];

    /// 제공자 서열 번호 (1 = 최선)
    pub fn rank(&self) -> u8 {
        match self {
            Self::StrongBuy => 1,
            Self::Buy => 2,
            Self::Hold => 3,
            Self::Sell => 4,
            Self::StrongSell => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }

    /// 공통 척도 점수. 서열 1이 최선이므로 역순으로 매핑합니다.
    pub fn score(&self) -> NormalizedScore {
        NormalizedScore(6 - self.rank())
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.rank() == rank)
    }

    /// "2" 또는 "2 - Buy" 형식 파싱.
    ///
    /// 라벨이 있으면 해당 서열의 표준 라벨과 일치해야 합니다.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (number, label) = match text.split_once('-') {
            Some((number, label)) => (number.trim(), Some(label.trim())),
            None => (text, None),
        };

        let rank = Self::from_rank(number.parse().ok()?)?;
        match label {
            Some(label) if !label.eq_ignore_ascii_case(rank.label()) => None,
            _ => Some(rank),
        }
    }
}

/// Morningstar 별점 (0~5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarRating(u8);

impl StarRating {
    pub fn from_count(count: i64) -> Option<Self> {
        (0..=5).contains(&count).then_some(Self(count as u8))
    }

    /// 별 개수를 그대로 사용합니다.
    pub fn score(&self) -> NormalizedScore {
        NormalizedScore(self.0)
    }
}

/// Morningstar 지속가능성 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SustainabilityTier {
    NoRating,
    Low,
    BelowAverage,
    Average,
    AboveAverage,
    High,
}

impl SustainabilityTier {
    /// 최악 → 최선 순서
    pub const ALL: [SustainabilityTier; 6] = [
        SustainabilityTier::NoRating,
        SustainabilityTier::Low,
        SustainabilityTier::BelowAverage,
        SustainabilityTier::Average,
        SustainabilityTier::AboveAverage,
        SustainabilityTier::High,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoRating => "NO RATING",
            Self::Low => "LOW",
            Self::BelowAverage => "BELOW AVERAGE",
            Self::Average => "AVERAGE",
            Self::AboveAverage => "ABOVE AVERAGE",
            Self::High => "HIGH",
        }
    }

    pub fn score(&self) -> NormalizedScore {
        match self {
            Self::NoRating => NormalizedScore(0),
            Self::Low => NormalizedScore(1),
            Self::BelowAverage => NormalizedScore(2),
            Self::Average => NormalizedScore(3),
            Self::AboveAverage => NormalizedScore(4),
            Self::High => NormalizedScore(5),
        }
    }

    /// 대소문자 무시, 연속 공백은 하나로 취급
    pub fn parse(label: &str) -> Option<Self> {
        let collapsed = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        Self::ALL.into_iter().find(|tier| tier.label() == collapsed)
    }
}

/// 제공자 평가 결과를 공통 척도 점수로 변환합니다.
///
/// 상태가 `ok`가 아니면 사유와 관계없이 항상 0입니다.
pub fn normalize(rating: &ProviderRating) -> Result<NormalizedScore, UnmappedValue> {
    let Some(raw) = rating.raw_value() else {
        return Ok(NormalizedScore::MIN);
    };

    let score = match (rating.provider, raw) {
        (Provider::ZacksRank, RawRating::Ordinal(text)) => ZacksRank::parse(text).map(|r| r.score()),
        (Provider::MorningstarRating, RawRating::Stars(count)) => {
            StarRating::from_count(*count).map(|s| s.score())
        }
        (Provider::MorningstarSustainability, RawRating::Tier(label)) => {
            SustainabilityTier::parse(label).map(|t| t.score())
        }
        _ => None,
    };

    score.ok_or_else(|| UnmappedValue {
        provider: rating.provider,
        value: raw.to_string(),
    })
}

/// 척도 테이블의 완전성과 단조성을 검증합니다.
///
/// 모든 테이블은 0~5 범위 안에서 품질 순서대로 엄격히 증가해야 하며,
/// 각 라벨은 자기 자신으로 다시 파싱되어야 합니다.
pub fn validate_scale_tables() -> Result<(), RatingError> {
    // Zacks: 서열 역순(최악 → 최선)으로 점수가 증가해야 함
    let zacks: Vec<NormalizedScore> = ZacksRank::ALL.iter().rev().map(|r| r.score()).collect();
    check_monotone(Provider::ZacksRank, &zacks)?;
    for rank in ZacksRank::ALL {
        let text = format!("{} - {}", rank.rank(), rank.label());
        if ZacksRank::parse(&text) != Some(rank) {
            return Err(RatingError::ScaleTable(format!(
                "Zacks 라벨 '{}'을(를) 다시 파싱할 수 없습니다",
                text
            )));
        }
    }

    let stars: Vec<NormalizedScore> = (0..=5)
        .filter_map(StarRating::from_count)
        .map(|s| s.score())
        .collect();
    if stars.len() != 6 {
        return Err(RatingError::ScaleTable(
            "Morningstar 별점 테이블이 0~5를 모두 포함하지 않습니다".to_string(),
        ));
    }
    check_monotone(Provider::MorningstarRating, &stars)?;

    let tiers: Vec<NormalizedScore> = SustainabilityTier::ALL.iter().map(|t| t.score()).collect();
    check_monotone(Provider::MorningstarSustainability, &tiers)?;
    for tier in SustainabilityTier::ALL {
        if SustainabilityTier::parse(tier.label()) != Some(tier) {
            return Err(RatingError::ScaleTable(format!(
                "지속가능성 라벨 '{}'을(를) 다시 파싱할 수 없습니다",
                tier.label()
            )));
        }
    }

    Ok(())
}

fn check_monotone(provider: Provider, scores: &[NormalizedScore]) -> Result<(), RatingError> {
    if scores.iter().any(|s| *s > NormalizedScore::MAX) {
        return Err(RatingError::ScaleTable(format!(
            "{} 테이블에 범위를 벗어난 점수가 있습니다",
            provider
        )));
    }
    if scores.windows(2).any(|w| w[0] >= w[1]) {
        return Err(RatingError::ScaleTable(format!(
            "{} 테이블이 단조 증가하지 않습니다",
            provider
        )));
    }
    Ok(())
}
