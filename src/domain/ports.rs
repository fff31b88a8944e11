use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 帶認證的 GET：回傳完整 response body
#[async_trait]
pub trait HttpGetter: Send + Sync {
    async fn get(&self, url: &str, token: &str, extra: Option<&str>) -> Result<Vec<u8>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
impl<G: HttpGetter + ?Sized> HttpGetter for std::sync::Arc<G> {
    async fn get(&self, url: &str, token: &str, extra: Option<&str>) -> Result<Vec<u8>> {
        (**self).get(url, token, extra).await
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
