use crate::domain::model::EscalationPolicy;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Cannot request '{url}': {reason}")]
    RequestUrl { url: String, reason: String },

    #[error("API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Pagination stopped after {max_pages} pages without reaching total")]
    PageLimitExceeded { max_pages: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

impl PolicyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PolicyError::Transport(_)
            | PolicyError::RequestUrl { .. }
            | PolicyError::HttpStatus { .. }
            | PolicyError::PageLimitExceeded { .. } => ErrorCategory::Network,
            PolicyError::Decode(_) => ErrorCategory::Data,
            PolicyError::Config { .. }
            | PolicyError::MissingConfig { .. }
            | PolicyError::InvalidConfigValue { .. }
            | PolicyError::Validation { .. } => ErrorCategory::Configuration,
            PolicyError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PolicyError::Transport(_) => "Check network connectivity and the API base URL",
            PolicyError::RequestUrl { .. } => "Check the API base URL template",
            PolicyError::HttpStatus { status: 401 | 403, .. } => {
                "Check that the API token is valid for this account domain"
            }
            PolicyError::HttpStatus { .. } => "The PagerDuty API rejected the request, retry later",
            PolicyError::Decode(_) => "The API response did not match the expected format",
            PolicyError::PageLimitExceeded { .. } => {
                "The API kept reporting more pages, raise --max-pages or contact PagerDuty support"
            }
            PolicyError::Io(_) => "Check file permissions and paths",
            PolicyError::MissingConfig { .. } => {
                "Provide the value via the config file, a CLI flag or the environment"
            }
            PolicyError::Config { .. }
            | PolicyError::InvalidConfigValue { .. }
            | PolicyError::Validation { .. } => "Fix the configuration and try again",
        }
    }

    /// 對應 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Data => 3,
            ErrorCategory::System => 4,
        }
    }
}

/// 分頁抓取失敗：保留失敗前已累積的 policies
#[derive(Error, Debug)]
#[error("{error}")]
pub struct FetchError {
    pub partial: Vec<EscalationPolicy>,
    #[source]
    pub error: PolicyError,
}

impl FetchError {
    pub fn new(partial: Vec<EscalationPolicy>, error: PolicyError) -> Self {
        Self { partial, error }
    }

    pub fn into_parts(self) -> (Vec<EscalationPolicy>, PolicyError) {
        (self.partial, self.error)
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;
