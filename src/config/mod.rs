#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::cache::DEFAULT_CACHE_TTL;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://{domain}.pagerduty.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Fetcher 與 HTTP 客戶端共用的設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherSettings {
    /// `{domain}` 會被替換成帳號網域
    pub api_base_url: String,
    pub cache_ttl_seconds: u64,
    pub timeout_seconds: u64,
    pub max_pages: usize,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL.as_secs(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl FetcherSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for FetcherSettings {
    fn validate(&self) -> Result<()> {
        // 以範例網域檢查模板替換後的 URL
        let sample = self.api_base_url.replace("{domain}", "example");
        crate::utils::validation::validate_url("api_base_url", &sample)?;

        // 上限一年，避免時間換算溢位
        validate_range("cache_ttl_seconds", self.cache_ttl_seconds, 0, 365 * 24 * 60 * 60)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_positive_number("max_pages", self.max_pages, 1)?;
        Ok(())
    }
}
