//! 종목 티커 타입.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RatingError;

/// 주식 또는 ETF 종목 식별자.
///
/// 대소문자를 구분하는 불투명 문자열입니다. 비어 있지 않다는 것 외에는
/// 검증하지 않으며, 종목 인식 여부는 각 제공자가 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// 새 티커를 생성합니다.
    pub fn new(symbol: impl Into<String>) -> Result<Self, RatingError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(RatingError::InvalidInput(
                "티커는 비어 있을 수 없습니다".to_string(),
            ));
        }
        Ok(Self(symbol))
    }

    /// 문자열 참조 반환
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 여러 문자열을 한 번에 티커로 변환합니다.
    pub fn parse_list<I, S>(symbols: I) -> Result<Vec<Self>, RatingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        symbols.into_iter().map(Self::new).collect()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = RatingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}
