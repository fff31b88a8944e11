use crate::config::FetcherSettings;
use crate::utils::error::{PolicyError, Result};
use crate::utils::validation::{
    validate_account_domain, validate_non_empty_string, validate_substituted, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔格式：
///
/// ```toml
/// [pagerduty]
/// domain = "acme"
/// token = "${PAGERDUTY_TOKEN}"
///
/// [cache]
/// ttl_seconds = 3600
///
/// [http]
/// timeout_seconds = 30
/// max_pages = 1000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pagerduty: PagerDutyConfig,
    pub cache: Option<CacheConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerDutyConfig {
    pub domain: String,
    pub token: Option<String>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub max_pages: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PolicyError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PolicyError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PAGERDUTY_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PolicyError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 未設定的欄位使用預設值
    pub fn settings(&self) -> FetcherSettings {
        let defaults = FetcherSettings::default();
        FetcherSettings {
            api_base_url: self
                .pagerduty
                .api_base_url
                .clone()
                .unwrap_or(defaults.api_base_url),
            cache_ttl_seconds: self
                .cache
                .as_ref()
                .and_then(|c| c.ttl_seconds)
                .unwrap_or(defaults.cache_ttl_seconds),
            timeout_seconds: self
                .http
                .as_ref()
                .and_then(|h| h.timeout_seconds)
                .unwrap_or(defaults.timeout_seconds),
            max_pages: self
                .http
                .as_ref()
                .and_then(|h| h.max_pages)
                .unwrap_or(defaults.max_pages),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_account_domain(&self.pagerduty.domain)?;

        if let Some(token) = &self.pagerduty.token {
            validate_non_empty_string("pagerduty.token", token)?;
            validate_substituted("pagerduty.token", token)?;
        }

        self.settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[pagerduty]
domain = "acme"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.settings(), FetcherSettings::default());
        assert!(config.pagerduty.token.is_none());
    }

    #[test]
    fn test_full_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[pagerduty]
domain = "acme"
token = "abc"
api_base_url = "http://localhost:9000/{{domain}}"

[cache]
ttl_seconds = 120

[http]
timeout_seconds = 5
max_pages = 10
"#
        )
        .unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        let settings = config.settings();

        assert!(config.validate().is_ok());
        assert_eq!(settings.api_base_url, "http://localhost:9000/{domain}");
        assert_eq!(settings.cache_ttl_seconds, 120);
        assert_eq!(settings.timeout_seconds, 5);
        assert_eq!(settings.max_pages, 10);
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("PD_POLICIES_TEST_TOKEN", "from-env");
        let config = TomlConfig::from_toml_str(
            r#"
[pagerduty]
domain = "acme"
token = "${PD_POLICIES_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.pagerduty.token.as_deref(), Some("from-env"));

        let config = TomlConfig::from_toml_str(
            r#"
[pagerduty]
domain = "acme"
token = "${PD_POLICIES_UNSET_TOKEN}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[pagerduty").unwrap_err();
        assert!(matches!(err, PolicyError::Config { .. }));
    }
}
