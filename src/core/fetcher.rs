use crate::config::FetcherSettings;
use crate::core::cache::PolicyCache;
use crate::core::clock::SystemClock;
use crate::domain::model::{EscalationPolicy, EscalationPolicyPage};
use crate::domain::ports::{Clock, HttpGetter};
use crate::utils::error::{FetchError, PolicyError, Result};
use crate::utils::validation::validate_account_domain;
use chrono::{DateTime, Utc};
use url::Url;

// API docs: https://developer.pagerduty.com/documentation/rest/escalation_policies/on_call
pub const ESCALATION_POLICIES_ON_CALL_PATH: &str = "/api/v1/escalation_policies/on_call";
pub const PAGE_LIMIT: usize = 100;

/// 取得帳號下所有 escalation policies，結果快取於記憶體。
///
/// 快取不區分 token 與帳號網域：一個 `PolicyFetcher` 只服務一個 PagerDuty 帳號。
/// 快取有效期間以其他網域呼叫，仍會拿到先前帳號的資料；
/// 需要查詢多個帳號時，每個帳號各建一個 `PolicyFetcher`。
pub struct PolicyFetcher<G: HttpGetter, C: Clock = SystemClock> {
    getter: G,
    cache: PolicyCache<C>,
    api_base_url: String,
    max_pages: usize,
}

impl<G: HttpGetter> PolicyFetcher<G, SystemClock> {
    pub fn new(getter: G, settings: &FetcherSettings) -> Self {
        Self::with_clock(getter, SystemClock, settings)
    }
}

impl<G: HttpGetter, C: Clock> PolicyFetcher<G, C> {
    pub fn with_clock(getter: G, clock: C, settings: &FetcherSettings) -> Self {
        Self {
            getter,
            cache: PolicyCache::new(clock, settings.cache_ttl()),
            api_base_url: settings.api_base_url.clone(),
            max_pages: settings.max_pages,
        }
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.is_cached().await
    }

    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cache.cached_at().await
    }

    /// 快取未過期時不發出任何請求；否則重新抓取全部分頁並整份替換快取。
    ///
    /// 失敗時 [`FetchError::partial`] 帶有出錯前已取得的 policies，快取維持原狀。
    pub async fn get_escalation_policies(
        &self,
        token: &str,
        domain: &str,
    ) -> std::result::Result<Vec<EscalationPolicy>, FetchError> {
        validate_account_domain(domain).map_err(|e| FetchError::new(Vec::new(), e))?;

        self.cache
            .get_or_refresh(|| self.fetch_all_pages(token, domain))
            .await
    }

    async fn fetch_all_pages(
        &self,
        token: &str,
        domain: &str,
    ) -> std::result::Result<Vec<EscalationPolicy>, FetchError> {
        let mut policies = Vec::new();
        let mut offset = 0;

        for _ in 0..self.max_pages {
            let url = match paged_url(
                &self.api_base_url,
                ESCALATION_POLICIES_ON_CALL_PATH,
                domain,
                offset,
                PAGE_LIMIT,
            ) {
                Ok(url) => url,
                Err(e) => return Err(FetchError::new(policies, e)),
            };

            let body = match self.getter.get(&url, token, None).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("GET {} failed: {}", url, e);
                    return Err(FetchError::new(policies, e));
                }
            };
            tracing::debug!("📡 Got {} bytes from URL {}", body.len(), url);

            let page: EscalationPolicyPage = match serde_json::from_slice(&body) {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Failed to decode escalation policy page from {}: {}", url, e);
                    return Err(FetchError::new(policies, PolicyError::Decode(e)));
                }
            };

            policies.extend(page.escalation_policies);

            // 依回應本身的 offset/total 判斷是否還有下一頁
            if page.offset < page.total {
                offset += PAGE_LIMIT;
            } else {
                tracing::info!(
                    "Fetched {} escalation policies for domain '{}'",
                    policies.len(),
                    domain
                );
                return Ok(policies);
            }
        }

        tracing::error!(
            "Escalation policy pagination for '{}' did not finish within {} pages",
            domain,
            self.max_pages
        );
        Err(FetchError::new(
            policies,
            PolicyError::PageLimitExceeded {
                max_pages: self.max_pages,
            },
        ))
    }
}

/// 組出分頁 URL：`{base}{path}?offset=..&limit=..`，base 中的 `{domain}` 以帳號網域替換
pub fn paged_url(
    base_template: &str,
    path: &str,
    domain: &str,
    offset: usize,
    limit: usize,
) -> Result<String> {
    let base = base_template.replace("{domain}", domain);
    let joined = format!("{}{}", base.trim_end_matches('/'), path);

    let mut url = Url::parse(&joined).map_err(|e| PolicyError::InvalidConfigValue {
        field: "api_base_url".to_string(),
        value: joined.clone(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    url.query_pairs_mut()
        .append_pair("offset", &offset.to_string())
        .append_pair("limit", &limit.to_string());

    Ok(url.into())
}
