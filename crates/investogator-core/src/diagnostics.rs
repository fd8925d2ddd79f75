//! 진단 이벤트 싱크.
//!
//! 전역 로거 대신 컴포넌트에 명시적으로 주입하여, 테스트에서 제공자 실패 사유를
//! 전역 부작용 없이 검증할 수 있게 합니다.

use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Provider, ProviderRating, RatingStatus};
use crate::types::Ticker;

/// 제공자 호출 한 건에 대한 진단 이벤트.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub ticker: Ticker,
    pub provider: Provider,
    pub status: RatingStatus,
    pub message: String,
    pub elapsed_ms: u64,
}

impl Diagnostic {
    /// 평가 결과에서 진단 이벤트 생성
    pub fn from_rating(ticker: &Ticker, rating: &ProviderRating, elapsed_ms: u64) -> Self {
        let message = match (rating.raw_value(), rating.reason()) {
            (Some(raw), _) => format!("raw value '{}'", raw),
            (None, Some(reason)) => reason.to_string(),
            (None, None) => "provider reports no rating".to_string(),
        };

        Self {
            ticker: ticker.clone(),
            provider: rating.provider,
            status: rating.status(),
            message,
            elapsed_ms,
        }
    }
}

/// 진단 이벤트 수신자.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: Diagnostic);
}

/// `tracing`으로 전달하는 기본 싱크.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: Diagnostic) {
        match event.status {
            RatingStatus::Ok => debug!(
                ticker = %event.ticker,
                provider = %event.provider,
                elapsed_ms = event.elapsed_ms,
                "{}",
                event.message
            ),
            RatingStatus::NotRated => info!(
                ticker = %event.ticker,
                provider = %event.provider,
                elapsed_ms = event.elapsed_ms,
                "{}",
                event.message
            ),
            RatingStatus::Unreachable | RatingStatus::Unparseable => warn!(
                ticker = %event.ticker,
                provider = %event.provider,
                status = %event.status,
                elapsed_ms = event.elapsed_ms,
                "{}",
                event.message
            ),
        }
    }
}

/// 이벤트를 메모리에 모으는 싱크 (테스트용).
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 기록된 이벤트 복사본
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// 특정 상태의 이벤트만 조회
    pub fn with_status(&self, status: RatingStatus) -> Vec<Diagnostic> {
        self.events()
            .into_iter()
            .filter(|e| e.status == status)
            .collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        let ticker = Ticker::new("XYZ").unwrap();

        sink.record(Diagnostic::from_rating(
            &ticker,
            &ProviderRating::unreachable(Provider::MorningstarRating, "HTTP 503"),
            12,
        ));
        sink.record(Diagnostic::from_rating(
            &ticker,
            &ProviderRating::not_rated(Provider::MorningstarSustainability),
            3,
        ));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "HTTP 503");
        assert_eq!(events[0].elapsed_ms, 12);

        let unreachable = sink.with_status(RatingStatus::Unreachable);
        assert_eq!(unreachable.len(), 1);
        assert_eq!(unreachable[0].provider, Provider::MorningstarRating);
    }
}
