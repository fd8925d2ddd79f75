//! ETF 카테고리 카탈로그.
//!
//! 카테고리 이름으로 순위를 매길 티커 목록을 얻습니다.

pub mod etfdb;

use async_trait::async_trait;
use investogator_core::Ticker;
use std::fmt;
use std::str::FromStr;

use crate::error::{DataError, Result};

pub use etfdb::EtfdbCatalog;

macro_rules! etf_categories {
    ($($variant:ident => ($slug:literal, $id:literal)),+ $(,)?) => {
        /// ETFdb 카테고리.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EtfCategory {
            $($variant),+
        }

        impl EtfCategory {
            /// 모든 카테고리 (ETFdb ID 순)
            pub const ALL: &'static [EtfCategory] = &[$(EtfCategory::$variant),+];

            /// CLI에서 쓰는 이름
            pub fn slug(&self) -> &'static str {
                match self {
                    $(EtfCategory::$variant => $slug),+
                }
            }

            /// ETFdb 카테고리 ID
            pub fn id(&self) -> u32 {
                match self {
                    $(EtfCategory::$variant => $id),+
                }
            }
        }
    };
}

etf_categories! {
    LargeCapBlend => ("large-cap-blend", 2),
    LargeCapGrowth => ("large-cap-growth", 3),
    Financials => ("financials", 4),
    SmallCapBlend => ("small-cap-blend", 5),
    Leveraged => ("leveraged", 6),
    Japan => ("japan", 7),
    Energy => ("energy", 8),
    EmergingMarkets => ("emerging-markets", 9),
    LargeCapValue => ("large-cap-value", 11),
    LeveragedCommodities => ("leveraged-commodities", 12),
    Inverse => ("inverse", 13),
    LatinAmerica => ("latin-america", 14),
    Technology => ("technology", 15),
    China => ("china", 16),
    ForeignLargeCap => ("foreign-large-cap", 17),
    MidCapBlend => ("mid-cap-blend", 18),
    PreciousMetals => ("precious-metals", 19),
    Commodities => ("commodities", 20),
    RealEstate => ("real-estate", 21),
    ConsumerDiscretionary => ("consumer-discretionary", 22),
    GovernmentBonds => ("government-bonds", 23),
    Utilities => ("utilities", 24),
    AsiaPacific => ("asia-pacific", 25),
    ConsumerStaples => ("consumer-staples", 26),
    SmallCapGrowth => ("small-cap-growth", 27),
    Europe => ("europe", 28),
    HealthBiotech => ("health-biotech", 29),
    Metals => ("metals", 30),
    SmallCapValue => ("small-cap-value", 31),
    LeveragedRealEstate => ("leveraged-real-estate", 32),
    MidCapValue => ("mid-cap-value", 33),
    OilGas => ("oil-gas", 34),
    MortgageBackedSecurities => ("mortgage-backed-securities", 35),
    MidCapGrowth => ("mid-cap-growth", 36),
    Currency => ("currency", 37),
    InflationProtectedBonds => ("inflation-protected-bonds", 38),
    AgriculturalCommodities => ("agricultural-commodities", 39),
    TotalBondMarket => ("total-bond-market", 40),
    Communications => ("communications", 41),
    AllCap => ("all-cap", 42),
    DiversifiedPortfolio => ("diversified-portfolio", 43),
    Global => ("global", 44),
}

impl fmt::Display for EtfCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for EtfCategory {
    type Err = DataError;

    /// 대소문자 무시, 공백과 밑줄은 하이픈으로 취급
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == normalized)
            .ok_or_else(|| DataError::InvalidData(format!("unknown ETF category: {}", s)))
    }
}

/// 카테고리별 티커 목록 조회.
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    /// 카테고리 상위 `limit`개 티커 (카탈로그 자체 순서)
    async fn tickers(&self, category: EtfCategory, limit: usize) -> Result<Vec<Ticker>>;
}
