use crate::core::{HistoryStore, Storage};
use crate::domain::model::Offer;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;

/// Offer history kept as a JSON array of `{"title", "link"}` objects.
pub struct JsonHistory<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonHistory<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> HistoryStore for JsonHistory<S> {
    async fn load(&self) -> Result<Vec<Offer>> {
        let Some(data) = self.storage.read_file(&self.path).await? else {
            tracing::info!("No history file at {}, starting fresh", self.path);
            return Ok(Vec::new());
        };

        let offers: Vec<Offer> =
            serde_json::from_slice(&data).map_err(|source| WatchError::HistoryError {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Loaded {} offers from {}", offers.len(), self.path);
        Ok(offers)
    }

    async fn save(&self, offers: &[Offer]) -> Result<()> {
        let data = serde_json::to_vec(offers)?;
        self.storage.write_file(&self.path, &data).await?;

        tracing::debug!("Saved {} offers to {}", offers.len(), self.path);
        Ok(())
    }
}
