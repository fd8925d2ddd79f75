//! 엔진 오류 타입.
//!
//! 제공자 장애는 평가 상태로 전달되므로 여기 포함되지 않습니다.
//! 설정 또는 프로그래밍 오류만 집계 작업을 중단시킵니다.

use investogator_core::{Provider, RatingError};
use thiserror::Error;

/// 엔진 오류.
#[derive(Debug, Error)]
pub enum EngineError {
    /// 요청된 제공자에 등록된 어댑터가 없음
    #[error("등록되지 않은 제공자: {0}")]
    UnconfiguredProvider(Provider),

    /// 척도 테이블 검증 실패
    #[error("척도 테이블 오류: {0}")]
    ScaleTable(String),

    /// 설정 오류
    #[error("설정 오류: {0}")]
    Config(String),
}

impl From<RatingError> for EngineError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::ScaleTable(msg) => EngineError::ScaleTable(msg),
            other => EngineError::Config(other.to_string()),
        }
    }
}
