pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ResolvedConfig};

pub use adapters::http::ReqwestGetter;
pub use config::{toml_config::TomlConfig, FetcherSettings};
pub use self::core::{
    cache::PolicyCache,
    clock::{ManualClock, SystemClock},
    fetcher::PolicyFetcher,
};
pub use domain::model::{
    EscalationPolicy, EscalationPolicyPage, EscalationRule, OnCall, OnCallUser, RuleObject,
    Service,
};
pub use domain::ports::{Clock, HttpGetter};
pub use utils::error::{FetchError, PolicyError, Result};
