use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::SourceConfig;
use crate::error::{AppError, Context};

use super::{Endpoint, FetchResult, PageQuery};

/// Transport for raw page bodies.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the undecoded body of one page. Non-success statuses are errors.
    async fn fetch(&self, endpoint: Endpoint, query: &PageQuery) -> FetchResult<Vec<u8>>;
}

/// `PageSource` backed by a pooled reqwest client.
///
/// The client keeps reqwest's default unbounded connection pool; how many
/// requests run at once is decided by the caller's `RequestLimiter`.
pub struct HttpPageSource {
    client: Client,
    config: SourceConfig,
}

impl HttpPageSource {
    pub fn new(config: SourceConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to construct HTTP client")?;
        Ok(Self { client, config })
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Day => &self.config.day_url,
            Endpoint::Minute => &self.config.minute_url,
        }
    }

    fn classify(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout(self.timeout())
        } else {
            AppError::Reqwest(err)
        }
    }

    fn timeout(&self) -> Duration {
        self.config.timeout()
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, endpoint: Endpoint, query: &PageQuery) -> FetchResult<Vec<u8>> {
        let response = self
            .client
            .get(self.url(endpoint))
            .header(USER_AGENT, self.config.user_agent.as_str())
            .query(&query.params())
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status));
        }

        let body = response.bytes().await.map_err(|err| self.classify(err))?;
        Ok(body.to_vec())
    }
}
