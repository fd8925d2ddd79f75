//! 실제 어댑터와 HTTP fetcher를 mock 서버에 연결한 전체 흐름.

use investogator_core::{
    HttpConfig, MemorySink, Provider, ProviderSet, ProvidersConfig, RatingStatus, Ticker,
};
use investogator_data::{default_adapters, ContentFetcher, HttpFetcher};
use investogator_engine::{AggregatorConfig, RankingEngine, RatingAggregator};
use std::sync::Arc;

fn providers_config(base: &str) -> ProvidersConfig {
    ProvidersConfig {
        zacks_base_url: base.to_string(),
        morningstar_base_url: base.to_string(),
        sustainability_base_url: base.to_string(),
        ..ProvidersConfig::default()
    }
}

fn fetcher() -> Arc<dyn ContentFetcher> {
    Arc::new(HttpFetcher::new(&HttpConfig::default()).unwrap())
}

#[tokio::test]
async fn xyz_over_http() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/funds/etf/XYZ/profile")
        .with_status(200)
        .with_body(r#"<div class="zr_rankbox">Zacks ETF Rank 2 - Buy 2</div>"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/security-identifier/XYZ")
        .with_status(200)
        .with_body(r#"{"starRating":4}"#)
        .create_async()
        .await;

    // 토큰이 없으므로 지속가능성 조회는 unreachable
    let sink = Arc::new(MemorySink::new());
    let aggregator = RatingAggregator::new(
        default_adapters(&providers_config(&server.url()), fetcher()),
        sink.clone(),
        AggregatorConfig::default(),
    )
    .unwrap();

    let composite = aggregator
        .aggregate(&Ticker::new("XYZ").unwrap(), &ProviderSet::all())
        .await
        .unwrap();

    assert_eq!(composite.total, 8);
    assert_eq!(composite.max_total(), 15);
    let unreachable = sink.with_status(RatingStatus::Unreachable);
    assert_eq!(unreachable.len(), 1);
    assert_eq!(unreachable[0].provider, Provider::MorningstarSustainability);
}

#[tokio::test]
async fn ranks_batch_with_outages() {
    let mut server = mockito::Server::new_async().await;
    for (symbol, stars) in [("AAA", "2"), ("BBB", "5")] {
        server
            .mock("GET", format!("/api/v1/security-identifier/{}", symbol).as_str())
            .with_status(200)
            .with_body(format!(r#"{{"starRating":{}}}"#, stars))
            .create_async()
            .await;
    }
    server
        .mock("GET", "/api/v1/security-identifier/CCC")
        .with_status(500)
        .create_async()
        .await;

    let aggregator = RatingAggregator::new(
        default_adapters(&providers_config(&server.url()), fetcher()),
        Arc::new(MemorySink::new()),
        AggregatorConfig::default(),
    )
    .unwrap();
    let engine = RankingEngine::new(Arc::new(aggregator)).with_concurrency(3);

    let ranked = engine
        .rank(
            &Ticker::parse_list(["CCC", "AAA", "BBB"]).unwrap(),
            &ProviderSet::single(Provider::MorningstarRating),
        )
        .await
        .unwrap();

    let order: Vec<(&str, u32)> = ranked
        .iter()
        .map(|r| (r.ticker.as_str(), r.total))
        .collect();
    assert_eq!(order, vec![("BBB", 5), ("AAA", 2), ("CCC", 0)]);
}
