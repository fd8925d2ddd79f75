//! Investogator CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # Zacks, Morningstar 평가 조회
//! investogator get-ratings SPY
//!
//! # 지속가능성 등급 (INVESTOGATOR_SUSTAINABILITY_TOKEN 필요)
//! investogator get-sustainability VTI
//!
//! # 카테고리 상위 ETF 순위
//! investogator get-ranked-etfs small-cap-value --limit 10
//!
//! # 직접 지정한 종목 순위 (JSON)
//! investogator --format json rank SPY QQQ IWM -p zacks -p morningstar
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use investogator_core::{
    init_logging, init_logging_from_env, InvestogatorConfig, LogConfig, Provider, ProviderSet,
    Ticker,
};
use investogator_data::EtfCategory;
use std::path::PathBuf;

use investogator_cli::commands::categories::list_categories;
use investogator_cli::commands::rank::{rank_category, rank_tickers};
use investogator_cli::commands::ratings::{
    default_rating_providers, show_ratings, show_sustainability,
};
use investogator_cli::{AppContext, OutputFormat};

#[derive(Parser)]
#[command(name = "investogator")]
#[command(about = "Investogator - 주식/ETF 평가 조회 및 순위 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 출력 형식
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목 평가 조회 (기본: Zacks, Morningstar 별점)
    GetRatings {
        /// 종목 심볼 (예: SPY)
        symbol: String,

        /// 사용할 제공자 (zacks, morningstar, sustainability)
        #[arg(short, long = "provider")]
        providers: Vec<Provider>,
    },

    /// Morningstar 지속가능성 등급 조회
    GetSustainability {
        /// 종목 심볼
        symbol: String,
    },

    /// ETF 카테고리 상위 종목 순위 (세 제공자 합산)
    GetRankedEtfs {
        /// 카테고리 (예: technology, small-cap-value)
        category: EtfCategory,

        /// 조회할 ETF 수 (기본: 설정값 25)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 지정한 종목들의 순위
    Rank {
        /// 종목 심볼 목록
        #[arg(required = true)]
        symbols: Vec<String>,

        /// 사용할 제공자 (기본: 전체)
        #[arg(short, long = "provider")]
        providers: Vec<Provider>,
    },

    /// 지원하는 ETF 카테고리 목록
    Categories,
}

fn parse_ticker(symbol: &str) -> Result<Ticker> {
    Ticker::new(symbol.trim().to_uppercase()).with_context(|| format!("잘못된 심볼: {:?}", symbol))
}

fn provider_set(providers: Vec<Provider>, default: ProviderSet) -> ProviderSet {
    if providers.is_empty() {
        default
    } else {
        providers.into_iter().collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InvestogatorConfig::load(path),
        None => InvestogatorConfig::load_default(),
    }
    .context("설정을 불러올 수 없습니다")?;

    // LOG_FORMAT이 지정되면 설정 파일의 [logging] 섹션 대신 환경 변수를 따릅니다.
    let logging = if std::env::var_os("LOG_FORMAT").is_some() && !cli.verbose {
        init_logging_from_env()
    } else {
        let mut log_config = LogConfig::from_settings(&config.logging);
        if cli.verbose {
            log_config.level = "debug".to_string();
        }
        init_logging(log_config)
    };
    logging.map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    if let Commands::Categories = cli.command {
        return list_categories(cli.format);
    }

    let default_limit = config.catalog.default_limit;
    let ctx = AppContext::from_config(config)?;

    match cli.command {
        Commands::GetRatings { symbol, providers } => {
            let ticker = parse_ticker(&symbol)?;
            let providers = provider_set(providers, default_rating_providers());
            show_ratings(&ctx, &ticker, &providers, cli.format).await?;
        }
        Commands::GetSustainability { symbol } => {
            let ticker = parse_ticker(&symbol)?;
            show_sustainability(&ctx, &ticker, cli.format).await?;
        }
        Commands::GetRankedEtfs { category, limit } => {
            rank_category(&ctx, category, limit.unwrap_or(default_limit), cli.format).await?;
        }
        Commands::Rank { symbols, providers } => {
            let tickers = symbols
                .iter()
                .map(|s| parse_ticker(s))
                .collect::<Result<Vec<_>>>()?;
            let providers = provider_set(providers, ProviderSet::all());
            rank_tickers(&ctx, &tickers, &providers, cli.format).await?;
        }
        Commands::Categories => list_categories(cli.format)?,
    }

    Ok(())
}
