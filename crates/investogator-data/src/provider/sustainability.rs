//! Morningstar 지속가능성(ESG) 등급 어댑터.
//!
//! ESG iframe 페이지는 접근 토큰(`e` 쿼리 파라미터)을 요구합니다. 토큰은
//! fetcher의 `CredentialSource`가 붙이며, 없으면 요청은 `unreachable`로 끝납니다.

use async_trait::async_trait;
use investogator_core::{Provider, ProviderRating, RawRating, Ticker};
use scraper::{Html, Selector};
use std::sync::Arc;

use super::{fetch_body, join_url, SourceAdapter};
use crate::fetch::{ContentFetcher, FetchRequest};

const TIER_SELECTOR: &str = ".text-margin5.text-size14";
const NO_RATING: &str = "NO RATING";
const CREDENTIAL_PARAM: &str = "e";

/// Morningstar ESG 페이지 스크레이퍼.
pub struct SustainabilityAdapter {
    fetcher: Arc<dyn ContentFetcher>,
    base_url: String,
    exchange: String,
}

impl SustainabilityAdapter {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        base_url: impl Into<String>,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            exchange: exchange.into(),
        }
    }

    /// ESG 페이지 요청 (토큰 제외)
    pub fn request(&self, ticker: &Ticker) -> FetchRequest {
        FetchRequest::get(join_url(&self.base_url, "etfq/esg-etf"))
            .with_query("t", format!("{}:{}", self.exchange, ticker.as_str()))
            .with_query("region", "usa")
            .with_query("culture", "en-US")
            .with_query("version", "RET")
            .with_query("cur", "")
            .with_query("test", "QuoteiFrame")
            .with_credential(CREDENTIAL_PARAM)
    }
}

#[async_trait]
impl SourceAdapter for SustainabilityAdapter {
    fn provider(&self) -> Provider {
        Provider::MorningstarSustainability
    }

    async fn fetch(&self, ticker: &Ticker) -> ProviderRating {
        let request = self.request(ticker);
        match fetch_body(
            self.fetcher.as_ref(),
            Provider::MorningstarSustainability,
            &request,
        )
        .await
        {
            Ok(html) => parse_esg(&html),
            Err(rating) => rating,
        }
    }
}

/// ESG 페이지에서 등급 라벨을 추출합니다.
pub fn parse_esg(html: &str) -> ProviderRating {
    let provider = Provider::MorningstarSustainability;
    let selector = match Selector::parse(TIER_SELECTOR) {
        Ok(s) => s,
        Err(e) => return ProviderRating::unparseable(provider, format!("selector: {:?}", e)),
    };

    let document = Html::parse_document(html);
    let label = document
        .select(&selector)
        .next()
        .map(|el| {
            // 라벨이 여러 줄에 걸쳐 있어도 단어 사이 공백은 하나로 맞춥니다.
            el.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase()
        });

    match label {
        None => ProviderRating::unparseable(provider, "tier element not found"),
        Some(label) if label.is_empty() => {
            ProviderRating::unparseable(provider, "tier element is empty")
        }
        Some(label) if label == NO_RATING => ProviderRating::not_rated(provider),
        Some(label) => ProviderRating::ok(provider, RawRating::Tier(label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_support::StubFetcher;
    use investogator_core::{normalize, RatingStatus};

    fn esg_page(tier: &str) -> String {
        format!(
            r#"<html><body><div class="sal-component">
                <span class="text-margin5 text-size14">{}</span>
                <span class="text-size14">Portfolio Sustainability Score</span>
            </div></body></html>"#,
            tier
        )
    }

    #[test]
    fn test_parse_tier_upper_cased() {
        let rating = parse_esg(&esg_page(" Above Average "));
        assert_eq!(
            rating.raw_value(),
            Some(&RawRating::Tier("ABOVE AVERAGE".to_string()))
        );
        assert_eq!(normalize(&rating).unwrap().value(), 4);
    }

    #[test]
    fn test_parse_no_rating() {
        assert_eq!(parse_esg(&esg_page("No Rating")).status(), RatingStatus::NotRated);
    }

    #[test]
    fn test_parse_multiline_label() {
        let rating = parse_esg(&esg_page("No\n                Rating"));
        assert_eq!(rating.status(), RatingStatus::NotRated);

        let rating = parse_esg(&esg_page("\n  Above\n\t  Average\n"));
        assert_eq!(
            rating.raw_value(),
            Some(&RawRating::Tier("ABOVE AVERAGE".to_string()))
        );
        assert_eq!(normalize(&rating).unwrap().value(), 4);
    }

    #[test]
    fn test_parse_missing_element() {
        let html = r#"<html><body><span class="text-size14">High</span></body></html>"#;
        assert_eq!(parse_esg(html).status(), RatingStatus::Unparseable);
        assert_eq!(parse_esg(&esg_page("  ")).status(), RatingStatus::Unparseable);
    }

    #[test]
    fn test_request_query() {
        let adapter = SustainabilityAdapter::new(
            Arc::new(StubFetcher::new()),
            "http://etfs.morningstar.com",
            "ARCX",
        );

        let request = adapter.request(&Ticker::new("VTI").unwrap());

        assert_eq!(request.url, "http://etfs.morningstar.com/etfq/esg-etf");
        assert!(request
            .query
            .contains(&("t".to_string(), "ARCX:VTI".to_string())));
        assert!(request.query.contains(&("cur".to_string(), String::new())));
        assert_eq!(request.credential_param.as_deref(), Some("e"));
    }
}
