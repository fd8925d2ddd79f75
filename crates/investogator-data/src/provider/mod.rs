//! 평가 제공자 Source Adapter.
//!
//! 각 어댑터는 한 제공자의 평가 하나를 조회해 [`ProviderRating`]으로 돌려줍니다.
//! 네트워크 장애, 응답 형식 변경, "평가 없음"은 모두 상태 값으로 표현되며
//! 어댑터는 실패를 `Err`로 올리지 않습니다.
//!
//! ## 제공자
//! - `ZacksAdapter`: Zacks ETF Rank (1~5 서열, 1이 최상)
//! - `MorningstarRatingAdapter`: Morningstar 별점 (0~5)
//! - `SustainabilityAdapter`: Morningstar 지속가능성 등급 (HIGH ~ LOW)

pub mod morningstar;
pub mod sustainability;
pub mod zacks;

use async_trait::async_trait;
use investogator_core::{Provider, ProviderRating, ProvidersConfig, Ticker};
use std::sync::Arc;
use tracing::debug;

use crate::fetch::{ContentFetcher, FetchError, FetchRequest};

pub use morningstar::MorningstarRatingAdapter;
pub use sustainability::SustainabilityAdapter;
pub use zacks::ZacksAdapter;

/// 제공자 하나의 평가 조회 인터페이스.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// 이 어댑터가 담당하는 제공자.
    fn provider(&self) -> Provider;

    /// 티커 하나의 평가 조회. 항상 결과를 반환합니다.
    async fn fetch(&self, ticker: &Ticker) -> ProviderRating;
}

/// 설정된 세 제공자의 어댑터를 모두 생성합니다.
pub fn default_adapters(
    config: &ProvidersConfig,
    fetcher: Arc<dyn ContentFetcher>,
) -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        Arc::new(ZacksAdapter::new(fetcher.clone(), &config.zacks_base_url)),
        Arc::new(MorningstarRatingAdapter::new(
            fetcher.clone(),
            &config.morningstar_base_url,
        )),
        Arc::new(SustainabilityAdapter::new(
            fetcher,
            &config.sustainability_base_url,
            &config.sustainability_exchange,
        )),
    ]
}

/// 요청을 보내고 성공 응답 본문을 반환합니다.
///
/// 전송 실패와 2xx 이외의 상태는 `unreachable` 평가로 바뀌어 `Err`에 담깁니다.
pub(crate) async fn fetch_body(
    fetcher: &dyn ContentFetcher,
    provider: Provider,
    request: &FetchRequest,
) -> Result<String, ProviderRating> {
    let response = fetcher
        .fetch(request)
        .await
        .map_err(|e| ProviderRating::unreachable(provider, e.to_string()))?;

    if !response.is_success() {
        debug!(
            provider = %provider,
            url = %request.url,
            status = response.status,
            "Provider returned non-success status"
        );
        return Err(ProviderRating::unreachable(
            provider,
            format!("HTTP {}", response.status),
        ));
    }

    Ok(response.body)
}

/// `base`와 `path`를 슬래시 하나로 잇습니다.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `base` 경로 뒤에 `segments`를 하나씩 붙인 URL.
///
/// 각 세그먼트는 퍼센트 인코딩되므로 `BRK/B` 같은 티커도 한 세그먼트로 유지됩니다.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<String, FetchError> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| FetchError::InvalidRequest(format!("base URL '{}': {}", base, e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| FetchError::InvalidRequest(format!("base URL '{}' cannot have a path", base)))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url.to_string())
}
