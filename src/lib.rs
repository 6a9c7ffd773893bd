pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, TelegramConfig};

pub use core::{
    fetcher::OlxScraper, history::JsonHistory, notifier::TelegramNotifier, watcher::WatchEngine,
};
pub use domain::model::{Offer, RunReport};
pub use utils::error::{Result, WatchError};
