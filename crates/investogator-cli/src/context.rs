//! 실행 환경 조립.

use anyhow::{Context, Result};
use investogator_core::{InvestogatorConfig, TracingSink};
use investogator_data::{
    default_adapters, ContentFetcher, EnvCredential, EtfdbCatalog, HttpFetcher,
};
use investogator_engine::{AggregatorConfig, RankingEngine, RatingAggregator};
use std::sync::Arc;
use tracing::debug;

/// 설정으로부터 구성된 fetcher와 엔진.
pub struct AppContext {
    pub config: InvestogatorConfig,
    pub fetcher: Arc<dyn ContentFetcher>,
    pub engine: RankingEngine,
}

impl AppContext {
    /// 지속가능성 토큰은 `INVESTOGATOR_SUSTAINABILITY_TOKEN`에서 매 요청마다 읽습니다.
    pub fn from_config(config: InvestogatorConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)
            .context("HTTP 클라이언트를 만들 수 없습니다")?
            .with_credential_source(Arc::new(EnvCredential::sustainability()));
        let fetcher: Arc<dyn ContentFetcher> = Arc::new(fetcher);

        let aggregator = RatingAggregator::new(
            default_adapters(&config.providers, fetcher.clone()),
            Arc::new(TracingSink),
            AggregatorConfig::from(&config.engine),
        )
        .context("평가 엔진 초기화 실패")?;

        let engine =
            RankingEngine::new(Arc::new(aggregator)).with_concurrency(config.engine.concurrency);

        debug!(
            concurrency = engine.concurrency(),
            parallel_providers = config.engine.parallel_providers,
            "Rating engine ready"
        );

        Ok(Self {
            config,
            fetcher,
            engine,
        })
    }

    /// ETFdb 카탈로그
    pub fn catalog(&self) -> EtfdbCatalog {
        EtfdbCatalog::new(self.fetcher.clone(), self.config.catalog.base_url.as_str())
    }
}
