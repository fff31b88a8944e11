use crate::utils::error::{PolicyError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PolicyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PolicyError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PolicyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PolicyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PolicyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PolicyError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// PagerDuty 子網域，例如 `acme`（對應 acme.pagerduty.com）
pub fn validate_account_domain(domain: &str) -> Result<()> {
    static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();
    let re = DOMAIN_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").expect("account domain pattern is valid")
    });

    if !re.is_match(domain) {
        return Err(PolicyError::Validation {
            message: format!(
                "Invalid account domain '{}': expected a PagerDuty subdomain such as 'acme'",
                domain
            ),
        });
    }
    Ok(())
}

/// 設定檔中 `${VAR}` 在環境變數未設定時會原樣保留，不能當成真正的值使用
pub fn validate_substituted(field_name: &str, value: &str) -> Result<()> {
    if value.starts_with("${") && value.ends_with('}') {
        return Err(PolicyError::MissingConfig {
            field: format!("{} ({} is not set)", field_name, value),
        });
    }
    Ok(())
}
