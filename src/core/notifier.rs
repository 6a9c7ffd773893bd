use crate::config::TelegramConfig;
use crate::core::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Error body returned by the Bot API on rejected calls.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    description: Option<String>,
}

pub struct TelegramNotifier {
    config: TelegramConfig,
    client: Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> bool {
        let payload = SendMessage {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };

        let response = match self
            .client
            .post(self.config.send_message_url())
            .form(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                // reqwest includes the URL, which carries the bot token.
                tracing::warn!("Telegram request failed: {}", e.without_url());
                return false;
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Telegram accepted message ({})", status);
            return true;
        }

        let description = response
            .json::<ApiResponse>()
            .await
            .ok()
            .and_then(|body| body.description)
            .unwrap_or_else(|| "no description".to_string());
        tracing::warn!("Telegram rejected message: HTTP {} ({})", status, description);
        false
    }
}
