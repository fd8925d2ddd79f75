//! 외부 콘텐츠 조회.
//!
//! 어댑터는 요청 대상(URL, 메서드, 쿼리)만 구성하고 실제 전송은
//! [`ContentFetcher`]에 위임합니다. 인증 토큰처럼 갱신될 수 있는 자격증명도
//! 어댑터가 아니라 fetcher가 [`CredentialSource`]에서 받아 붙입니다.

use async_trait::async_trait;
use investogator_core::HttpConfig;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// 콘텐츠 조회 실패.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP 요청 실패: {0}")]
    Transport(String),

    #[error("요청 시간 초과 ({0:?})")]
    Timeout(Duration),

    #[error("자격증명 없음: 쿼리 파라미터 '{0}'")]
    MissingCredential(String),

    #[error("잘못된 요청: {0}")]
    InvalidRequest(String),
}

/// 조회 요청.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// 자격증명을 붙일 쿼리 파라미터 이름
    pub credential_param: Option<String>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            credential_param: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// fetcher가 자격증명을 `param` 쿼리 파라미터로 붙이도록 표시합니다.
    pub fn with_credential(mut self, param: impl Into<String>) -> Self {
        self.credential_param = Some(param.into());
        self
    }
}

/// 조회 응답 (상태 코드와 본문).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 외부 콘텐츠 조회 인터페이스.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

/// 갱신 가능한 접근 토큰 공급자.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// 현재 유효한 토큰. 없으면 `None`.
    async fn token(&self) -> Option<SecretString>;
}

/// 고정 토큰.
pub struct StaticCredential(SecretString);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self(SecretString::new(token.into()))
    }
}

#[async_trait]
impl CredentialSource for StaticCredential {
    async fn token(&self) -> Option<SecretString> {
        Some(SecretString::new(self.0.expose_secret().into()))
    }
}

/// 환경 변수에서 매 호출마다 토큰을 다시 읽습니다.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    /// 지속가능성 토큰 기본 환경 변수
    pub const SUSTAINABILITY_TOKEN_VAR: &'static str = "INVESTOGATOR_SUSTAINABILITY_TOKEN";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn sustainability() -> Self {
        Self::new(Self::SUSTAINABILITY_TOKEN_VAR)
    }
}

#[async_trait]
impl CredentialSource for EnvCredential {
    async fn token(&self) -> Option<SecretString> {
        std::env::var(&self.var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| SecretString::new(v.into()))
    }
}

/// reqwest 기반 fetcher.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    credential: Option<Arc<dyn CredentialSource>>,
}

impl HttpFetcher {
    /// 설정의 타임아웃과 User-Agent로 생성
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::InvalidRequest(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout(),
            credential: None,
        })
    }

    /// 자격증명 공급자 지정
    pub fn with_credential_source(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.credential = Some(source);
        self
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);

        if let Some(param) = &request.credential_param {
            let token = match &self.credential {
                Some(source) => source.token().await,
                None => None,
            }
            .ok_or_else(|| FetchError::MissingCredential(param.clone()))?;

            builder = builder.query(&[(param.as_str(), token.expose_secret())]);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        debug!(url = %request.url, status, bytes = body.len(), "Fetched content");

        Ok(FetchResponse { status, body })
    }
}
