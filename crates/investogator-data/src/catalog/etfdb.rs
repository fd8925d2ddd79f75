//! ETFdb 데이터셋 카탈로그.
//!
//! `/data_set/` JSON 응답의 `rows[].symbol`은 `<a href="/etf/SPY/">SPY</a>`
//! 형태의 HTML 조각입니다.

use async_trait::async_trait;
use investogator_core::Ticker;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{CategoryCatalog, EtfCategory};
use crate::error::{DataError, Result};
use crate::fetch::{ContentFetcher, FetchRequest};
use crate::provider::join_url;

#[derive(Debug, Deserialize)]
struct DataSet {
    #[serde(default)]
    rows: Vec<DataSetRow>,
}

#[derive(Debug, Deserialize)]
struct DataSetRow {
    #[serde(default)]
    symbol: Option<String>,
}

/// ETFdb 카테고리 카탈로그 (연초 대비 수익률 내림차순).
pub struct EtfdbCatalog {
    fetcher: Arc<dyn ContentFetcher>,
    base_url: String,
}

impl EtfdbCatalog {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn request(&self, category: EtfCategory, limit: usize) -> FetchRequest {
        FetchRequest::get(join_url(&self.base_url, "data_set/"))
            .with_query("tm", "1725")
            .with_query("cond", format!(r#"{{"by_category":{}}}"#, category.id()))
            .with_query("no_null_sort", "true")
            .with_query("count_by_id", "")
            .with_query("sort", "ytd_percent_return")
            .with_query("order", "desc")
            .with_query("limit", limit.to_string())
            .with_query("offset", "0")
    }
}

#[async_trait]
impl CategoryCatalog for EtfdbCatalog {
    async fn tickers(&self, category: EtfCategory, limit: usize) -> Result<Vec<Ticker>> {
        let response = self.fetcher.fetch(&self.request(category, limit)).await?;
        if !response.is_success() {
            return Err(DataError::Fetch(format!(
                "ETFdb returned HTTP {} for category {}",
                response.status, category
            )));
        }

        let tickers = parse_data_set(&response.body)?;
        debug!(category = %category, count = tickers.len(), "Loaded category tickers");
        Ok(tickers.into_iter().take(limit).collect())
    }
}

/// 데이터셋 JSON을 티커 목록으로 변환합니다. 심볼이 없는 행은 건너뜁니다.
pub fn parse_data_set(body: &str) -> Result<Vec<Ticker>> {
    let data: DataSet = serde_json::from_str(body)?;

    let mut tickers = Vec::with_capacity(data.rows.len());
    for (index, row) in data.rows.iter().enumerate() {
        match row.symbol.as_deref().and_then(extract_symbol) {
            Some(symbol) => tickers.push(Ticker::new(symbol)?),
            None => warn!(row = index, symbol = ?row.symbol, "Skipping data set row without symbol"),
        }
    }
    Ok(tickers)
}

/// 심볼 마크업에서 티커를 꺼냅니다.
///
/// 앵커 텍스트를 우선 사용하고, 없으면 `/`로 나눈 세 번째 조각을 씁니다.
pub fn extract_symbol(markup: &str) -> Option<String> {
    let markup = markup.trim();
    if markup.is_empty() {
        return None;
    }
    if !markup.contains('<') {
        return Some(markup.to_string());
    }

    let fragment = Html::parse_fragment(markup);
    let anchor_text = Selector::parse("a").ok().and_then(|selector| {
        fragment
            .select(&selector)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    });

    anchor_text.or_else(|| {
        markup
            .split('/')
            .nth(2)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
