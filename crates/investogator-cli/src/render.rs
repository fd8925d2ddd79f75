//! 결과 출력 형식.
//!
//! 제공자 상태별 문구는 여기서만 결정합니다. 엔진은 상태 값만 넘겨줍니다.

use anyhow::Result;
use clap::ValueEnum;
use investogator_core::{CompositeRating, ProviderScore, RankedList, RatingStatus};
use investogator_data::EtfCategory;
use serde::Serialize;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 사람이 읽는 텍스트
    #[default]
    Text,
    /// JSON
    Json,
}

/// 항목 하나의 설명 문구.
pub fn describe_component(ticker: &str, component: &ProviderScore) -> String {
    let name = component.rating.provider.display_name();
    match component.rating.status() {
        RatingStatus::Ok => match component.rating.raw_value() {
            Some(raw) => format!(
                "{} 평가 {}: {} ({} / 5)",
                name,
                ticker,
                raw,
                component.score.value()
            ),
            None => format!("{} 평가 {}: {} / 5", name, ticker, component.score.value()),
        },
        RatingStatus::Unreachable => format!(
            "{}에 지금 연결할 수 없습니다 ({})",
            name,
            component.rating.reason().unwrap_or("unknown")
        ),
        RatingStatus::Unparseable => format!(
            "{} 응답에서 {} 평가를 찾을 수 없습니다 ({})",
            name,
            ticker,
            component.rating.reason().unwrap_or("unknown")
        ),
        RatingStatus::NotRated => format!("{}: {} 평가가 없습니다", ticker, name),
    }
}

/// 단일 종목 종합 평가
pub fn render_composite(composite: &CompositeRating, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(composite)?);
    }

    let ticker = composite.ticker.as_str();
    let mut lines: Vec<String> = composite
        .components
        .iter()
        .map(|c| describe_component(ticker, c))
        .collect();
    if composite.components.len() > 1 {
        lines.push(format!(
            "합계 {}: {} / {}",
            ticker,
            composite.total,
            composite.max_total()
        ));
    }
    Ok(lines.join("\n"))
}

/// 순위 목록. 각 줄은 `SYMBOL: total / max`.
pub fn render_ranked(ranked: &RankedList, max_total: u32, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(ranked)?);
    }

    if ranked.is_empty() {
        return Ok("종목을 찾을 수 없습니다.".to_string());
    }

    Ok(ranked
        .iter()
        .map(|r| format!("{}: {} / {}", r.ticker, r.total, max_total))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[derive(Serialize)]
struct CategoryEntry {
    slug: &'static str,
    id: u32,
}

/// 지원 카테고리 목록
pub fn render_categories(format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let entries: Vec<CategoryEntry> = EtfCategory::ALL
            .iter()
            .map(|c| CategoryEntry {
                slug: c.slug(),
                id: c.id(),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    Ok(EtfCategory::ALL
        .iter()
        .map(|c| format!("{:>3}  {}", c.id(), c.slug()))
        .collect::<Vec<_>>()
        .join("\n"))
}
