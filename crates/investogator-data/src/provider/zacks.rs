//! Zacks ETF Rank 어댑터.
//!
//! ## 데이터 소스
//! - `/funds/etf/{ticker}/profile`: `zr_rankbox` 요소 안의
//!   `Zacks ETF Rank 1 - Strong Buy 1` 형태 텍스트

use async_trait::async_trait;
use investogator_core::{Provider, ProviderRating, RawRating, Ticker};
use scraper::{Html, Selector};
use std::sync::Arc;

use super::{endpoint_url, fetch_body, SourceAdapter};
use crate::fetch::{ContentFetcher, FetchError, FetchRequest};

const RANK_BOX_SELECTOR: &str = ".zr_rankbox";
const RANK_MARKER: &str = "Zacks ETF Rank";

/// Zacks 프로필 페이지 스크레이퍼.
pub struct ZacksAdapter {
    fetcher: Arc<dyn ContentFetcher>,
    base_url: String,
}

impl ZacksAdapter {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// 티커의 프로필 페이지 URL
    pub fn profile_url(&self, ticker: &Ticker) -> Result<String, FetchError> {
        endpoint_url(&self.base_url, &["funds", "etf", ticker.as_str(), "profile"])
    }
}

#[async_trait]
impl SourceAdapter for ZacksAdapter {
    fn provider(&self) -> Provider {
        Provider::ZacksRank
    }

    async fn fetch(&self, ticker: &Ticker) -> ProviderRating {
        let request = match self.profile_url(ticker) {
            Ok(url) => FetchRequest::get(url),
            Err(e) => return ProviderRating::unreachable(Provider::ZacksRank, e.to_string()),
        };
        match fetch_body(self.fetcher.as_ref(), Provider::ZacksRank, &request).await {
            Ok(html) => parse_profile(&html),
            Err(rating) => rating,
        }
    }
}

/// 프로필 HTML에서 순위 텍스트를 추출합니다.
pub fn parse_profile(html: &str) -> ProviderRating {
    let provider = Provider::ZacksRank;
    let selector = match Selector::parse(RANK_BOX_SELECTOR) {
        Ok(s) => s,
        Err(e) => return ProviderRating::unparseable(provider, format!("selector: {:?}", e)),
    };

    let document = Html::parse_document(html);
    let Some(rank_box) = document.select(&selector).next() else {
        return ProviderRating::unparseable(provider, "rank box not found");
    };

    let text = rank_box.text().collect::<String>().replace('\u{a0}', " ");
    let Some((_, remainder)) = text.split_once(RANK_MARKER) else {
        return ProviderRating::unparseable(provider, "rank marker not found");
    };

    let mut tokens: Vec<&str> = remainder.split_whitespace().collect();
    if tokens.is_empty() || matches!(tokens[0], "NA" | "N/A") {
        return ProviderRating::not_rated(provider);
    }

    // 순위 뒤에 순위 배지 숫자가 한 번 더 붙어 나옴
    if tokens.len() > 1 && tokens.last() == tokens.first() {
        tokens.pop();
    }

    ProviderRating::ok(provider, RawRating::Ordinal(tokens.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_support::StubFetcher;
    use investogator_core::{normalize, RatingStatus};

    fn profile(rank_box: &str) -> String {
        format!(
            r#"<html><body><div class="quote_rank_summary">{}</div></body></html>"#,
            rank_box
        )
    }

    #[test]
    fn test_parse_rank_with_badge() {
        let html = profile(
            r#"<div class="zr_rankbox"><p class="rank_view">Zacks ETF Rank&nbsp;1 - Strong Buy <span class="rank_chip">1</span></p></div>"#,
        );

        let rating = parse_profile(&html);
        assert_eq!(
            rating.raw_value(),
            Some(&RawRating::Ordinal("1 - Strong Buy".to_string()))
        );
        assert_eq!(normalize(&rating).unwrap().value(), 5);
    }

    #[test]
    fn test_parse_hold() {
        let html = profile(
            r#"<div class="zr_rankbox">Zacks ETF Rank 3 - Hold <span>3</span></div>"#,
        );

        let rating = parse_profile(&html);
        assert_eq!(normalize(&rating).unwrap().value(), 3);
    }

    #[test]
    fn test_parse_not_rated() {
        let html = profile(r#"<div class="zr_rankbox">Zacks ETF Rank NA</div>"#);
        assert_eq!(parse_profile(&html).status(), RatingStatus::NotRated);

        let html = profile(r#"<div class="zr_rankbox">Zacks ETF Rank</div>"#);
        assert_eq!(parse_profile(&html).status(), RatingStatus::NotRated);
    }

    #[test]
    fn test_parse_missing_box_or_marker() {
        let missing_box = profile(r#"<div class="other">Zacks ETF Rank 2 - Buy</div>"#);
        assert_eq!(parse_profile(&missing_box).status(), RatingStatus::Unparseable);

        let missing_marker = profile(r#"<div class="zr_rankbox">Style Box: Large Growth</div>"#);
        assert_eq!(
            parse_profile(&missing_marker).status(),
            RatingStatus::Unparseable
        );
    }

    #[test]
    fn test_profile_url_encodes_ticker() {
        let adapter = ZacksAdapter::new(Arc::new(StubFetcher::new()), "https://www.zacks.com");

        assert_eq!(
            adapter.profile_url(&Ticker::new("BRK/B").unwrap()).unwrap(),
            "https://www.zacks.com/funds/etf/BRK%2FB/profile"
        );
        assert_eq!(
            adapter.profile_url(&Ticker::new("A?B").unwrap()).unwrap(),
            "https://www.zacks.com/funds/etf/A%3FB/profile"
        );
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_unreachable() {
        let fetcher = Arc::new(StubFetcher::new());
        let adapter = ZacksAdapter::new(fetcher.clone(), "zacks");

        let rating = adapter.fetch(&Ticker::new("SPY").unwrap()).await;

        assert_eq!(rating.status(), RatingStatus::Unreachable);
        assert!(fetcher.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_uses_profile_url() {
        let fetcher = Arc::new(StubFetcher::new().respond(
            "https://www.zacks.com/funds/etf/SPY/profile",
            200,
            &profile(r#"<div class="zr_rankbox">Zacks ETF Rank 2 - Buy 2</div>"#),
        ));
        let adapter = ZacksAdapter::new(fetcher.clone(), "https://www.zacks.com");

        let rating = adapter.fetch(&Ticker::new("SPY").unwrap()).await;

        assert_eq!(
            rating.raw_value(),
            Some(&RawRating::Ordinal("2 - Buy".to_string()))
        );
        assert_eq!(fetcher.recorded().len(), 1);
    }
}
