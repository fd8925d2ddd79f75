//! 종목 순위.
//!
//! 티커 목록을 입력 순서대로 집계한 뒤 합계 내림차순으로 안정 정렬합니다.
//! 합계가 같으면 입력 순서가 유지되므로, 동시 실행 여부와 관계없이 결과가 같습니다.

use futures::stream::{self, StreamExt};
use investogator_core::{CompositeRating, ProviderSet, RankedList, RatingStatus, Ticker};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::aggregator::RatingAggregator;
use crate::error::EngineError;

/// 순위 계산 통계.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankStats {
    /// 집계한 종목 수
    pub tickers: usize,
    /// 제공자 호출 수
    pub providers_called: usize,
    pub ok: usize,
    pub unreachable: usize,
    pub unparseable: usize,
    pub not_rated: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RankStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 집계 결과에서 상태별 건수를 계산합니다.
    pub fn from_ratings(ratings: &[CompositeRating], elapsed: Duration) -> Self {
        let mut stats = Self {
            tickers: ratings.len(),
            elapsed,
            ..Self::default()
        };

        for component in ratings.iter().flat_map(|r| r.components.iter()) {
            stats.providers_called += 1;
            match component.rating.status() {
                RatingStatus::Ok => stats.ok += 1,
                RatingStatus::Unreachable => stats.unreachable += 1,
                RatingStatus::Unparseable => stats.unparseable += 1,
                RatingStatus::NotRated => stats.not_rated += 1,
            }
        }
        stats
    }

    /// 성공률 (%)
    pub fn success_rate(&self) -> f64 {
        if self.providers_called == 0 {
            0.0
        } else {
            (self.ok as f64 / self.providers_called as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        info!(
            operation = operation,
            tickers = self.tickers,
            providers_called = self.providers_called,
            ok = self.ok,
            unreachable = self.unreachable,
            unparseable = self.unparseable,
            not_rated = self.not_rated,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "Ranking complete"
        );
    }
}

/// 여러 종목의 종합 평가 순위를 계산합니다.
pub struct RankingEngine {
    aggregator: Arc<RatingAggregator>,
    concurrency: usize,
}

impl RankingEngine {
    /// 순차 실행 엔진
    pub fn new(aggregator: Arc<RatingAggregator>) -> Self {
        Self {
            aggregator,
            concurrency: 1,
        }
    }

    /// 동시에 집계할 최대 종목 수 (최소 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn aggregator(&self) -> &RatingAggregator {
        &self.aggregator
    }

    /// 티커 목록의 순위. 빈 목록이면 빈 결과를 반환합니다.
    pub async fn rank(
        &self,
        tickers: &[Ticker],
        providers: &ProviderSet,
    ) -> Result<RankedList, EngineError> {
        self.rank_with_progress(tickers, providers, |_, _| {}).await
    }

    /// 종목 하나의 집계가 끝날 때마다 `(완료 수, 전체 수)`를 보고합니다.
    pub async fn rank_with_progress<F>(
        &self,
        tickers: &[Ticker],
        providers: &ProviderSet,
        mut on_progress: F,
    ) -> Result<RankedList, EngineError>
    where
        F: FnMut(usize, usize),
    {
        if tickers.is_empty() {
            return Ok(RankedList::from_aggregated(Vec::new()));
        }

        // 제공자 호출 전에 설정 오류를 먼저 확인
        self.aggregator.ensure_configured(providers)?;

        let started = Instant::now();
        let total = tickers.len();
        info!(
            tickers = total,
            providers = providers.len(),
            concurrency = self.concurrency,
            "Ranking tickers"
        );

        let mut results = stream::iter(
            tickers
                .iter()
                .map(|ticker| self.aggregator.aggregate(ticker, providers)),
        )
        .buffered(self.concurrency);

        let mut aggregated = Vec::with_capacity(total);
        while let Some(result) = results.next().await {
            aggregated.push(result?);
            on_progress(aggregated.len(), total);
        }

        RankStats::from_ratings(&aggregated, started.elapsed()).log_summary("rank");
        Ok(RankedList::from_aggregated(aggregated))
    }
}
