use crate::config::toml_config::TomlConfig;
use crate::config::FetcherSettings;
use crate::utils::error::{PolicyError, Result};
use crate::utils::validation::{
    validate_account_domain, validate_non_empty_string, validate_substituted, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "pd-policies")]
#[command(about = "Fetch PagerDuty escalation policies and current on-call entries")]
pub struct CliConfig {
    /// PagerDuty 子網域（acme.pagerduty.com 的 acme）
    #[arg(long)]
    pub domain: Option<String>,

    #[arg(long, env = "PAGERDUTY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, help = "TOML config file; CLI flags take precedence")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub cache_ttl_seconds: Option<u64>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,
}

/// 合併設定檔與 CLI 參數後的結果
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub domain: String,
    pub token: String,
    pub settings: FetcherSettings,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };

        let mut settings = file
            .as_ref()
            .map(TomlConfig::settings)
            .unwrap_or_default();
        if let Some(url) = &self.api_base_url {
            settings.api_base_url = url.clone();
        }
        if let Some(ttl) = self.cache_ttl_seconds {
            settings.cache_ttl_seconds = ttl;
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(max_pages) = self.max_pages {
            settings.max_pages = max_pages;
        }

        let domain = self
            .domain
            .clone()
            .or_else(|| file.as_ref().map(|f| f.pagerduty.domain.clone()))
            .ok_or_else(|| PolicyError::MissingConfig {
                field: "domain".to_string(),
            })?;
        let token = self
            .token
            .clone()
            .or_else(|| file.as_ref().and_then(|f| f.pagerduty.token.clone()))
            .ok_or_else(|| PolicyError::MissingConfig {
                field: "token".to_string(),
            })?;

        let resolved = ResolvedConfig {
            domain,
            token,
            settings,
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_account_domain(&self.domain)?;
        validate_non_empty_string("token", &self.token)?;
        validate_substituted("token", &self.token)?;
        self.settings.validate()
    }
}
