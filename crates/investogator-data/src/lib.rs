//! 평가 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - 외부 콘텐츠 조회 인터페이스(`ContentFetcher`)와 reqwest 구현
//! - 제공자별 Source Adapter (Zacks, Morningstar 별점, Morningstar 지속가능성)
//! - ETFdb 카테고리 카탈로그

pub mod catalog;
pub mod error;
pub mod fetch;
pub mod provider;

pub use catalog::{CategoryCatalog, EtfCategory, EtfdbCatalog};
pub use error::{DataError, Result};
pub use fetch::{
    ContentFetcher, CredentialSource, EnvCredential, FetchError, FetchRequest, FetchResponse,
    HttpFetcher, StaticCredential,
};
pub use provider::{
    default_adapters, MorningstarRatingAdapter, SourceAdapter, SustainabilityAdapter,
    ZacksAdapter,
};
