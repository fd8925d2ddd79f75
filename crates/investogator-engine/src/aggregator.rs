//! 종목 단위 평가 집계.
//!
//! 요청된 제공자마다 어댑터를 한 번씩 호출하고, 결과를 정규화해 합산합니다.
//! 한 제공자의 실패는 해당 항목 점수만 0으로 만들 뿐 다른 항목에 영향을 주지 않습니다.

use futures::future::join_all;
use investogator_core::{
    normalize, rating_span, validate_scale_tables, CompositeRating, Diagnostic, DiagnosticsSink,
    EngineConfig, NormalizedScore, Provider, ProviderRating, ProviderScore, ProviderSet, Ticker,
};
use investogator_data::SourceAdapter;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn, Instrument};

use crate::error::EngineError;

/// 집계기 설정.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// 어댑터 호출 하나의 최대 대기 시간
    pub call_timeout: Duration,
    /// 한 종목 안에서 제공자를 동시에 호출할지 여부
    pub parallel_providers: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            parallel_providers: false,
        }
    }
}

impl From<&EngineConfig> for AggregatorConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            call_timeout: config.call_timeout(),
            parallel_providers: config.parallel_providers,
        }
    }
}

/// 제공자별 평가를 모아 종합 평가를 만듭니다.
pub struct RatingAggregator {
    adapters: BTreeMap<Provider, Arc<dyn SourceAdapter>>,
    sink: Arc<dyn DiagnosticsSink>,
    config: AggregatorConfig,
}

impl RatingAggregator {
    /// 어댑터 목록으로 집계기를 생성합니다.
    ///
    /// 척도 테이블 검증에 실패하면 생성되지 않습니다. 같은 제공자의 어댑터가
    /// 여러 개면 마지막 것이 사용됩니다.
    pub fn new(
        adapters: impl IntoIterator<Item = Arc<dyn SourceAdapter>>,
        sink: Arc<dyn DiagnosticsSink>,
        config: AggregatorConfig,
    ) -> Result<Self, EngineError> {
        validate_scale_tables()?;

        let mut registry = BTreeMap::new();
        for adapter in adapters {
            let provider = adapter.provider();
            if registry.insert(provider, adapter).is_some() {
                warn!(provider = %provider, "Replacing previously registered adapter");
            }
        }

        Ok(Self {
            adapters: registry,
            sink,
            config,
        })
    }

    /// 어댑터가 등록된 제공자
    pub fn providers(&self) -> ProviderSet {
        self.adapters.keys().copied().collect()
    }

    /// 요청된 제공자가 모두 등록되어 있는지 확인합니다.
    pub fn ensure_configured(&self, providers: &ProviderSet) -> Result<(), EngineError> {
        match providers.iter().find(|p| !self.adapters.contains_key(p)) {
            Some(missing) => Err(EngineError::UnconfiguredProvider(missing)),
            None => Ok(()),
        }
    }

    /// 한 종목의 종합 평가.
    ///
    /// 항목은 제공자 표준 순서로 정렬됩니다. 제공자 장애는 오류가 아니며,
    /// 등록되지 않은 제공자를 요청한 경우에만 `Err`를 반환합니다.
    pub async fn aggregate(
        &self,
        ticker: &Ticker,
        providers: &ProviderSet,
    ) -> Result<CompositeRating, EngineError> {
        let adapters = providers
            .iter()
            .map(|p| {
                self.adapters
                    .get(&p)
                    .cloned()
                    .ok_or(EngineError::UnconfiguredProvider(p))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let calls = if self.config.parallel_providers {
            join_all(adapters.iter().map(|adapter| self.call(ticker, adapter.as_ref()))).await
        } else {
            let mut calls = Vec::with_capacity(adapters.len());
            for adapter in &adapters {
                calls.push(self.call(ticker, adapter.as_ref()).await);
            }
            calls
        };

        let components = calls
            .into_iter()
            .map(|(rating, elapsed_ms)| self.score(ticker, rating, elapsed_ms))
            .collect();

        let composite = CompositeRating::new(ticker.clone(), components);
        debug!(
            ticker = %ticker,
            total = composite.total,
            max = composite.max_total(),
            "Aggregated ratings"
        );
        Ok(composite)
    }

    /// 어댑터 호출 (시간 제한 적용). 경과 시간(ms)을 함께 반환합니다.
    async fn call(&self, ticker: &Ticker, adapter: &dyn SourceAdapter) -> (ProviderRating, u64) {
        let provider = adapter.provider();
        let started = Instant::now();

        let rating = match tokio::time::timeout(self.config.call_timeout, adapter.fetch(ticker))
            .instrument(rating_span!("provider_call", ticker, provider))
            .await
        {
            Ok(rating) if rating.provider == provider => rating,
            Ok(rating) => ProviderRating::unparseable(
                provider,
                format!("adapter returned a rating for {}", rating.provider),
            ),
            Err(_) => ProviderRating::unreachable(
                provider,
                format!("timed out after {}s", self.config.call_timeout.as_secs_f64()),
            ),
        };

        (rating, started.elapsed().as_millis() as u64)
    }

    /// 정규화 후 진단 이벤트를 기록합니다.
    ///
    /// 척도 테이블에 없는 값은 `unparseable`로 낮추고 0점을 부여합니다.
    fn score(&self, ticker: &Ticker, rating: ProviderRating, elapsed_ms: u64) -> ProviderScore {
        let (rating, score) = match normalize(&rating) {
            Ok(score) => (rating, score),
            Err(unmapped) => (
                ProviderRating::unparseable(rating.provider, unmapped.to_string()),
                NormalizedScore::MIN,
            ),
        };

        self.sink
            .record(Diagnostic::from_rating(ticker, &rating, elapsed_ms));
        ProviderScore { rating, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use investogator_core::{MemorySink, RatingStatus, RawRating};

    struct FixedAdapter {
        provider: Provider,
        rating: ProviderRating,
    }

    #[async_trait]
    impl SourceAdapter for FixedAdapter {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn fetch(&self, _ticker: &Ticker) -> ProviderRating {
            self.rating.clone()
        }
    }

    fn fixed(provider: Provider, rating: ProviderRating) -> Arc<dyn SourceAdapter> {
        Arc::new(FixedAdapter { provider, rating })
    }

    #[tokio::test]
    async fn test_unmapped_value_downgraded() {
        let sink = Arc::new(MemorySink::new());
        let aggregator = RatingAggregator::new(
            vec![fixed(
                Provider::MorningstarRating,
                ProviderRating::ok(Provider::MorningstarRating, RawRating::Stars(7)),
            )],
            sink.clone(),
            AggregatorConfig::default(),
        )
        .unwrap();

        let composite = aggregator
            .aggregate(
                &Ticker::new("ABC").unwrap(),
                &ProviderSet::single(Provider::MorningstarRating),
            )
            .await
            .unwrap();

        let component = &composite.components[0];
        assert_eq!(component.rating.status(), RatingStatus::Unparseable);
        assert_eq!(component.score.value(), 0);
        assert_eq!(composite.total, 0);
        assert_eq!(sink.with_status(RatingStatus::Unparseable).len(), 1);
    }

    #[tokio::test]
    async fn test_mismatched_provider_rating_rejected() {
        let aggregator = RatingAggregator::new(
            vec![fixed(
                Provider::ZacksRank,
                ProviderRating::ok(Provider::MorningstarRating, RawRating::Stars(5)),
            )],
            Arc::new(MemorySink::new()),
            AggregatorConfig::default(),
        )
        .unwrap();

        let composite = aggregator
            .aggregate(
                &Ticker::new("ABC").unwrap(),
                &ProviderSet::single(Provider::ZacksRank),
            )
            .await
            .unwrap();

        assert_eq!(composite.components[0].rating.provider, Provider::ZacksRank);
        assert_eq!(composite.total, 0);
    }

    #[test]
    fn test_providers_and_ensure_configured() {
        let aggregator = RatingAggregator::new(
            vec![fixed(
                Provider::ZacksRank,
                ProviderRating::not_rated(Provider::ZacksRank),
            )],
            Arc::new(MemorySink::new()),
            AggregatorConfig::default(),
        )
        .unwrap();

        assert_eq!(aggregator.providers(), ProviderSet::single(Provider::ZacksRank));
        assert!(aggregator
            .ensure_configured(&ProviderSet::single(Provider::ZacksRank))
            .is_ok());
        assert!(matches!(
            aggregator.ensure_configured(&ProviderSet::all()),
            Err(EngineError::UnconfiguredProvider(Provider::MorningstarRating))
        ));
    }

    #[test]
    fn test_config_from_engine_settings() {
        let settings = EngineConfig {
            parallel_providers: true,
            call_timeout_secs: 3,
            ..EngineConfig::default()
        };

        let config = AggregatorConfig::from(&settings);
        assert!(config.parallel_providers);
        assert_eq!(config.call_timeout, Duration::from_secs(3));
    }
}
