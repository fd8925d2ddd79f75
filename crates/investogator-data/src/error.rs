//! 데이터 모듈 오류 타입.
//!
//! 제공자 어댑터는 이 타입을 반환하지 않습니다. 예상 가능한 제공자 장애는
//! `ProviderRating` 상태로 표현되며, 여기의 오류는 카탈로그 조회처럼
//! 실패 시 결과 자체가 없는 작업에만 쓰입니다.

use investogator_core::RatingError;
use thiserror::Error;

use crate::fetch::FetchError;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<FetchError> for DataError {
    fn from(err: FetchError) -> Self {
        DataError::Fetch(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<RatingError> for DataError {
    fn from(err: RatingError) -> Self {
        DataError::InvalidData(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
