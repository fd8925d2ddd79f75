//! 제공자 단일 호출 결과.

use serde::Serialize;
use std::fmt;

use super::provider::Provider;

/// 제공자 고유 형식의 평가 값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawRating {
    /// 서열 텍스트 (예: "2", "2 - Buy")
    Ordinal(String),
    /// 별 개수
    Stars(i64),
    /// 등급 라벨 (예: "ABOVE AVERAGE")
    Tier(String),
}

impl fmt::Display for RawRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinal(text) => f.write_str(text),
            Self::Stars(count) => write!(f, "{}", count),
            Self::Tier(label) => f.write_str(label),
        }
    }
}

/// 평가 호출 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingStatus {
    /// 평가 값 추출 성공
    Ok,
    /// 네트워크 오류, 타임아웃 또는 비정상 응답 코드
    Unreachable,
    /// 응답은 받았으나 평가 위치를 찾지 못함 (또는 척도에 없는 값)
    Unparseable,
    /// 제공자가 명시적으로 평가 없음을 표시
    NotRated,
}

impl fmt::Display for RatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Unparseable => write!(f, "unparseable"),
            Self::NotRated => write!(f, "not_rated"),
        }
    }
}

/// 상태와 값을 함께 담는 호출 결과.
///
/// 원시 값은 `Ok`에만 존재하므로 "값이 있으면 성공"이라는 불변식이 타입으로 보장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RatingOutcome {
    Ok { raw: RawRating },
    Unreachable { reason: String },
    Unparseable { reason: String },
    NotRated,
}

/// 하나의 (제공자, 티커) 조합에 대한 평가 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRating {
    pub provider: Provider,
    #[serde(flatten)]
    pub outcome: RatingOutcome,
}

impl ProviderRating {
    pub fn ok(provider: Provider, raw: RawRating) -> Self {
        Self {
            provider,
            outcome: RatingOutcome::Ok { raw },
        }
    }

    pub fn unreachable(provider: Provider, reason: impl Into<String>) -> Self {
        Self {
            provider,
            outcome: RatingOutcome::Unreachable {
                reason: reason.into(),
            },
        }
    }

    pub fn unparseable(provider: Provider, reason: impl Into<String>) -> Self {
        Self {
            provider,
            outcome: RatingOutcome::Unparseable {
                reason: reason.into(),
            },
        }
    }

    pub fn not_rated(provider: Provider) -> Self {
        Self {
            provider,
            outcome: RatingOutcome::NotRated,
        }
    }

    /// 호출 상태
    pub fn status(&self) -> RatingStatus {
        match self.outcome {
            RatingOutcome::Ok { .. } => RatingStatus::Ok,
            RatingOutcome::Unreachable { .. } => RatingStatus::Unreachable,
            RatingOutcome::Unparseable { .. } => RatingStatus::Unparseable,
            RatingOutcome::NotRated => RatingStatus::NotRated,
        }
    }

    /// 원시 평가 값 (`Ok`일 때만 존재)
    pub fn raw_value(&self) -> Option<&RawRating> {
        match &self.outcome {
            RatingOutcome::Ok { raw } => Some(raw),
            _ => None,
        }
    }

    /// 실패 사유 (접속 불가/파싱 실패일 때만 존재)
    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            RatingOutcome::Unreachable { reason } | RatingOutcome::Unparseable { reason } => {
                Some(reason)
            }
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, RatingOutcome::Ok { .. })
    }
}
