use crate::core::{HistoryStore, Notifier, OfferSource};
use crate::domain::model::RunReport;
use crate::domain::services::{format_failure_message, format_offer_message, new_offers};
use crate::utils::error::{Result, WatchError};
use chrono::Utc;

/// One scheduled run: fetch, diff against history, notify, persist.
pub struct WatchEngine<F: OfferSource, H: HistoryStore, N: Notifier> {
    source: F,
    history: H,
    notifier: N,
}

impl<F: OfferSource, H: HistoryStore, N: Notifier> WatchEngine<F, H, N> {
    pub fn new(source: F, history: H, notifier: N) -> Self {
        Self {
            source,
            history,
            notifier,
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::new(Utc::now());
        tracing::info!("Starting offer check");

        let offers = match self.source.fetch_offers().await {
            Ok(offers) => offers,
            Err(e) => {
                tracing::error!("Fetching offers failed: {}", e);
                self.report_failure(&e).await;
                return Err(e);
            }
        };
        report.fetched = offers.len();
        tracing::info!("Found {} offers", offers.len());

        let history = match self.history.load().await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Loading history failed: {}", e);
                self.report_failure(&e).await;
                return Err(e);
            }
        };

        let fresh = new_offers(&offers, &history);
        report.new_offers = fresh.len();

        if fresh.is_empty() {
            tracing::info!("No new offers");
            return Ok(report);
        }

        tracing::info!("{} new offers", fresh.len());
        for offer in &fresh {
            if self.notifier.notify(&format_offer_message(offer)).await {
                report.notified += 1;
                tracing::info!("Notification sent: {}", offer.title);
            } else {
                report.failed_notifications += 1;
                tracing::warn!("Notification failed: {}", offer.title);
            }
        }

        // The full page replaces history, including offers whose
        // notification failed.
        self.history.save(&offers).await?;
        report.history_written = true;

        tracing::info!(
            "Run finished in {} ms: {} new, {} notified, {} failed",
            report.elapsed().num_milliseconds(),
            report.new_offers,
            report.notified,
            report.failed_notifications
        );
        Ok(report)
    }

    async fn report_failure(&self, error: &WatchError) {
        if !self.notifier.notify(&format_failure_message(error)).await {
            tracing::warn!("Failure notification was not delivered");
        }
    }
}
