use crate::config::FetcherSettings;
use crate::domain::ports::HttpGetter;
use crate::utils::error::{PolicyError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 以 reqwest 實作的 PagerDuty 認證 GET
#[derive(Debug, Clone)]
pub struct ReqwestGetter {
    client: Client,
    timeout: Duration,
}

impl ReqwestGetter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn from_settings(settings: &FetcherSettings) -> Self {
        Self::new(settings.timeout())
    }

    /// PagerDuty v1 API 的 token 格式
    pub fn authorization_header(token: &str) -> String {
        format!("Token token={}", token)
    }

    /// 把 `extra`（`key=value&key2=value2`）附加到 URL 的 query 上
    fn with_extra_query(url: &str, extra: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(url).map_err(|e| PolicyError::RequestUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(extra) = extra.filter(|extra| !extra.is_empty()) {
            let pairs: Vec<(String, String)> = url::form_urlencoded::parse(extra.as_bytes())
                .into_owned()
                .collect();
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

impl Default for ReqwestGetter {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECONDS))
    }
}

#[async_trait]
impl HttpGetter for ReqwestGetter {
    async fn get(&self, url: &str, token: &str, extra: Option<&str>) -> Result<Vec<u8>> {
        let url = Self::with_extra_query(url, extra)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, Self::authorization_header(token))
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(PolicyError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
