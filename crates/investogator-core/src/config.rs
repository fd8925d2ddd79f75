//! 설정 관리.
//!
//! TOML 파일(`config/default.toml`)을 읽은 뒤 `INVESTOGATOR__` 접두사 환경 변수로
//! 덮어씁니다. 예: `INVESTOGATOR__ENGINE__CONCURRENCY=4`.
//!
//! 지속가능성 접근 토큰 같은 자격증명은 이 설정에 두지 않습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InvestogatorConfig {
    /// HTTP 클라이언트 설정
    pub http: HttpConfig,
    /// 평가 제공자 엔드포인트
    pub providers: ProvidersConfig,
    /// ETF 카테고리 카탈로그 설정
    pub catalog: CatalogConfig,
    /// 집계/순위 엔진 설정
    pub engine: EngineConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// HTTP 클라이언트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 평가 제공자 엔드포인트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Zacks 기본 URL
    pub zacks_base_url: String,
    /// Morningstar 식별자 조회 API 기본 URL
    pub morningstar_base_url: String,
    /// Morningstar ETF 지속가능성 기본 URL
    pub sustainability_base_url: String,
    /// 지속가능성 조회 시 티커 앞에 붙는 거래소 코드
    pub sustainability_exchange: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            zacks_base_url: "https://www.zacks.com".to_string(),
            morningstar_base_url: "http://www.morningstar.com".to_string(),
            sustainability_base_url: "http://etfs.morningstar.com".to_string(),
            sustainability_exchange: "ARCX".to_string(),
        }
    }
}

/// ETF 카테고리 카탈로그 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// ETFdb 기본 URL
    pub base_url: String,
    /// 카테고리당 기본 조회 종목 수
    pub default_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://etfdb.com".to_string(),
            default_limit: 25,
        }
    }
}

/// 집계/순위 엔진 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 동시에 집계할 최대 종목 수 (1 = 순차)
    pub concurrency: usize,
    /// 한 종목 안에서 제공자 호출을 병렬로 수행할지 여부
    pub parallel_providers: bool,
    /// 제공자 호출 1건의 상한 시간 (초)
    pub call_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            parallel_providers: false,
            call_timeout_secs: 10,
        }
    }
}

impl EngineConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl InvestogatorConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("INVESTOGATOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InvestogatorConfig::default();
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.catalog.default_limit, 25);
        assert_eq!(config.engine.concurrency, 1);
        assert!(!config.engine.parallel_providers);
        assert_eq!(config.providers.sustainability_exchange, "ARCX");
    }

    #[test]
    fn test_load_partial_file() {
        let path = std::env::temp_dir().join(format!(
            "investogator-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[engine]\nconcurrency = 4\n\n[catalog]\ndefault_limit = 10\n",
        )
        .unwrap();

        let config = InvestogatorConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.engine.concurrency, 4);
        assert_eq!(config.engine.call_timeout_secs, 10);
        assert_eq!(config.catalog.default_limit, 10);
        assert_eq!(config.catalog.base_url, "http://etfdb.com");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = InvestogatorConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.http.timeout_secs, 10);
    }
}
