//! 단일 종목 평가 조회.

use anyhow::Result;
use investogator_core::{Provider, ProviderSet, Ticker};
use tracing::info;

use crate::context::AppContext;
use crate::render::{render_composite, OutputFormat};

/// `get-ratings` 기본 제공자 (Zacks, Morningstar 별점)
pub fn default_rating_providers() -> ProviderSet {
    ProviderSet::new([Provider::ZacksRank, Provider::MorningstarRating])
}

/// 선택한 제공자로 한 종목을 평가하고 출력합니다.
pub async fn show_ratings(
    ctx: &AppContext,
    ticker: &Ticker,
    providers: &ProviderSet,
    format: OutputFormat,
) -> Result<()> {
    info!(ticker = %ticker, providers = providers.len(), "Fetching ratings");

    let composite = ctx.engine.aggregator().aggregate(ticker, providers).await?;
    println!("{}", render_composite(&composite, format)?);
    Ok(())
}

/// 지속가능성 등급만 조회합니다.
pub async fn show_sustainability(
    ctx: &AppContext,
    ticker: &Ticker,
    format: OutputFormat,
) -> Result<()> {
    show_ratings(
        ctx,
        ticker,
        &ProviderSet::single(Provider::MorningstarSustainability),
        format,
    )
    .await
}
