//! 평가 엔진 핵심 에러 타입.

use thiserror::Error;

/// 핵심 도메인 에러.
///
/// 제공자 장애(접속 불가, 파싱 실패, 미평가)는 에러가 아니라
/// [`crate::ProviderRating`]의 상태로 전달됩니다. 이 타입은 설정 오류나
/// 잘못된 입력처럼 작업 전체를 중단해야 하는 경우에만 사용합니다.
#[derive(Debug, Error)]
pub enum RatingError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 척도 테이블 검증 실패
    #[error("척도 테이블 에러: {0}")]
    ScaleTable(String),
}

impl From<config::ConfigError> for RatingError {
    fn from(err: config::ConfigError) -> Self {
        RatingError::Config(err.to_string())
    }
}

/// 핵심 작업을 위한 Result 타입.
pub type RatingResult<T> = Result<T, RatingError>;
