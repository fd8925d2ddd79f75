//! Morningstar 별점 어댑터.
//!
//! `/api/v1/security-identifier/{ticker}` JSON의 `starRating` 필드를 읽습니다.

use async_trait::async_trait;
use investogator_core::{Provider, ProviderRating, RawRating, Ticker};
use serde_json::Value;
use std::sync::Arc;

use super::{endpoint_url, fetch_body, SourceAdapter};
use crate::fetch::{ContentFetcher, FetchError, FetchRequest};

const STAR_FIELD: &str = "starRating";

/// Morningstar 종목 식별 API 클라이언트.
pub struct MorningstarRatingAdapter {
    fetcher: Arc<dyn ContentFetcher>,
    base_url: String,
}

impl MorningstarRatingAdapter {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn identifier_url(&self, ticker: &Ticker) -> Result<String, FetchError> {
        endpoint_url(
            &self.base_url,
            &["api", "v1", "security-identifier", ticker.as_str()],
        )
    }
}

#[async_trait]
impl SourceAdapter for MorningstarRatingAdapter {
    fn provider(&self) -> Provider {
        Provider::MorningstarRating
    }

    async fn fetch(&self, ticker: &Ticker) -> ProviderRating {
        let request = match self.identifier_url(ticker) {
            Ok(url) => FetchRequest::get(url),
            Err(e) => return ProviderRating::unreachable(Provider::MorningstarRating, e.to_string()),
        };
        match fetch_body(self.fetcher.as_ref(), Provider::MorningstarRating, &request).await {
            Ok(body) => parse_identifier(&body),
            Err(rating) => rating,
        }
    }
}

/// 식별 API 응답에서 별점을 추출합니다.
///
/// - `null`, `-1`, 빈 문자열: 평가 없음
/// - 정수 또는 정수 문자열: 별점 (범위 검사는 정규화 단계에서)
/// - 소수: 소수점 이하를 버린 별점 (`3.5` → 3)
pub fn parse_identifier(body: &str) -> ProviderRating {
    let provider = Provider::MorningstarRating;

    let json: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return ProviderRating::unparseable(provider, format!("invalid JSON: {}", e)),
    };

    let Some(value) = json.get(STAR_FIELD) else {
        return ProviderRating::unparseable(provider, format!("missing field '{}'", STAR_FIELD));
    };

    let stars = match value {
        Value::Null => return ProviderRating::not_rated(provider),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) if s.trim().is_empty() => return ProviderRating::not_rated(provider),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match stars {
        Some(-1) => ProviderRating::not_rated(provider),
        Some(count) => ProviderRating::ok(provider, RawRating::Stars(count)),
        None => ProviderRating::unparseable(provider, format!("unexpected {}: {}", STAR_FIELD, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_support::StubFetcher;
    use investogator_core::{normalize, RatingStatus};

    #[test]
    fn test_parse_star_rating() {
        let rating = parse_identifier(r#"{"ticker":"SPY","starRating":4}"#);
        assert_eq!(rating.raw_value(), Some(&RawRating::Stars(4)));
        assert_eq!(normalize(&rating).unwrap().value(), 4);
    }

    #[test]
    fn test_parse_numeric_string() {
        let rating = parse_identifier(r#"{"starRating":"3"}"#);
        assert_eq!(rating.raw_value(), Some(&RawRating::Stars(3)));
    }

    #[test]
    fn test_parse_fractional_stars_truncated() {
        let rating = parse_identifier(r#"{"starRating":3.5}"#);
        assert_eq!(rating.raw_value(), Some(&RawRating::Stars(3)));
        assert_eq!(normalize(&rating).unwrap().value(), 3);

        let rating = parse_identifier(r#"{"starRating":4.0}"#);
        assert_eq!(rating.raw_value(), Some(&RawRating::Stars(4)));
    }

    #[test]
    fn test_identifier_url_encodes_ticker() {
        let adapter =
            MorningstarRatingAdapter::new(Arc::new(StubFetcher::new()), "http://www.morningstar.com");

        assert_eq!(
            adapter.identifier_url(&Ticker::new("BRK/B").unwrap()).unwrap(),
            "http://www.morningstar.com/api/v1/security-identifier/BRK%2FB"
        );
    }

    #[test]
    fn test_parse_not_rated_markers() {
        for body in [
            r#"{"starRating":null}"#,
            r#"{"starRating":-1}"#,
            r#"{"starRating":""}"#,
        ] {
            assert_eq!(parse_identifier(body).status(), RatingStatus::NotRated, "{}", body);
        }
    }

    #[test]
    fn test_parse_unparseable() {
        for body in [
            "<html>not json</html>",
            r#"{"ticker":"SPY"}"#,
            r#"{"starRating":"four"}"#,
            r#"{"starRating":[4]}"#,
        ] {
            assert_eq!(
                parse_identifier(body).status(),
                RatingStatus::Unparseable,
                "{}",
                body
            );
        }
    }

    #[test]
    fn test_out_of_range_stars_reach_normalizer() {
        let rating = parse_identifier(r#"{"starRating":9}"#);
        assert!(rating.is_ok());
        assert!(normalize(&rating).is_err());
    }

    #[tokio::test]
    async fn test_fetch_non_success() {
        let fetcher = Arc::new(StubFetcher::new().respond(
            "http://www.morningstar.com/api/v1/security-identifier/XYZ",
            500,
            "",
        ));
        let adapter = MorningstarRatingAdapter::new(fetcher, "http://www.morningstar.com");

        let rating = adapter.fetch(&Ticker::new("XYZ").unwrap()).await;

        assert_eq!(rating.status(), RatingStatus::Unreachable);
        assert_eq!(rating.reason(), Some("HTTP 500"));
    }
}
