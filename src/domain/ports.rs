use crate::domain::model::Offer;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// `Ok(None)` when the file does not exist.
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn history_file(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// Produces the current offer list, in page order.
#[async_trait]
pub trait OfferSource: Send + Sync {
    async fn fetch_offers(&self) -> Result<Vec<Offer>>;
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Offer>>;
    async fn save(&self, offers: &[Offer]) -> Result<()>;
}

/// Delivery is best-effort: `false` means the message was not accepted, and
/// the caller decides whether that matters.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> bool;
}
