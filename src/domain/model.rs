use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One listing entry. Two offers are the same offer when their links match;
/// the title is only carried along for the notification text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    pub link: String,
}

impl Offer {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// What a single run did, for logging and the process summary line.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub fetched: usize,
    pub new_offers: usize,
    pub notified: usize,
    pub failed_notifications: usize,
    pub history_written: bool,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            fetched: 0,
            new_offers: 0,
            notified: 0,
            failed_notifications: 0,
            history_written: false,
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}
