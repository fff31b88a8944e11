use crate::domain::model::EscalationPolicy;
use crate::domain::ports::Clock;
use crate::utils::error::FetchError;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct CachedPolicies {
    policies: Vec<EscalationPolicy>,
    fetched_at: DateTime<Utc>,
}

/// Escalation policy 快取：整份替換，不做合併。
///
/// `refresh_lock` 涵蓋整個「檢查 → 抓取 → 寫入」流程，同時間只會有一個抓取在進行，
/// 其他呼叫者等待後直接拿到新資料。`snapshot` 只在讀寫快照時短暫持有，
/// 所以抓取進行中 `is_cached` / `cached_at` 仍可立即回答。
pub struct PolicyCache<C: Clock> {
    clock: C,
    ttl: Duration,
    refresh_lock: Mutex<()>,
    snapshot: RwLock<Option<Arc<CachedPolicies>>>,
}

impl<C: Clock> PolicyCache<C> {
    pub fn new(clock: C, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            refresh_lock: Mutex::new(()),
            snapshot: RwLock::new(None),
        }
    }

    fn current(&self) -> Option<Arc<CachedPolicies>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn replace(&self, cached: CachedPolicies) {
        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(cached));
    }

    /// 是否曾成功抓取過（不考慮是否過期）
    pub async fn is_cached(&self) -> bool {
        self.current().is_some()
    }

    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.current().map(|cached| cached.fetched_at)
    }

    fn is_fresh(&self, cached: &CachedPolicies) -> bool {
        // 時鐘倒退時 elapsed 為負，仍視為有效
        match self
            .clock
            .now()
            .signed_duration_since(cached.fetched_at)
            .to_std()
        {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => true,
        }
    }

    /// 快取有效時直接回傳；否則執行 `refresh`，成功才替換快取。
    pub async fn get_or_refresh<F, Fut>(
        &self,
        refresh: F,
    ) -> std::result::Result<Vec<EscalationPolicy>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<EscalationPolicy>, FetchError>>,
    {
        let _refreshing = self.refresh_lock.lock().await;

        if let Some(cached) = self.current() {
            if self.is_fresh(&cached) {
                tracing::info!(
                    "Returning {} cached escalation policies (fetched at {}, ttl {:?})",
                    cached.policies.len(),
                    cached.fetched_at,
                    self.ttl
                );
                return Ok(cached.policies.clone());
            }
            tracing::debug!("Escalation policy cache expired (fetched at {})", cached.fetched_at);
        }

        let policies = refresh().await?;

        let fetched_at = self.clock.now();
        tracing::debug!(
            "Caching {} escalation policies at {}",
            policies.len(),
            fetched_at
        );
        self.replace(CachedPolicies {
            policies: policies.clone(),
            fetched_at,
        });

        Ok(policies)
    }
}
