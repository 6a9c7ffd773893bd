pub mod fetcher;
pub mod history;
pub mod notifier;
pub mod parser;
pub mod watcher;

pub use crate::domain::model::{Offer, RunReport};
pub use crate::domain::ports::{ConfigProvider, HistoryStore, Notifier, OfferSource, Storage};
pub use crate::utils::error::Result;
