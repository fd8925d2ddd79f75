//! 여러 종목 순위 계산.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use investogator_core::{ProviderSet, Ticker};
use investogator_data::{CategoryCatalog, EtfCategory};
use tracing::info;

use crate::context::AppContext;
use crate::render::{render_ranked, OutputFormat};

/// 티커 목록의 순위를 계산해 출력합니다.
pub async fn rank_tickers(
    ctx: &AppContext,
    tickers: &[Ticker],
    providers: &ProviderSet,
    format: OutputFormat,
) -> Result<()> {
    // JSON 출력일 때는 진행률 표시 생략
    let pb = if format == OutputFormat::Text && !tickers.is_empty() {
        ProgressBar::new(tickers.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let ranked = ctx
        .engine
        .rank_with_progress(tickers, providers, |done, _| pb.set_position(done as u64))
        .await;
    pb.finish_and_clear();
    let ranked = ranked?;

    println!("{}", render_ranked(&ranked, providers.max_total(), format)?);
    Ok(())
}

/// 카테고리 상위 ETF를 세 제공자 모두로 평가해 순위를 출력합니다.
pub async fn rank_category(
    ctx: &AppContext,
    category: EtfCategory,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let tickers = ctx.catalog().tickers(category, limit).await?;
    info!(category = %category, count = tickers.len(), "Ranking category");

    if format == OutputFormat::Text && !tickers.is_empty() {
        println!("📊 {} 카테고리 {}개 ETF 평가 중...", category, tickers.len());
    }

    rank_tickers(ctx, &tickers, &ProviderSet::all(), format).await
}
