pub mod cli;

use std::env;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str = "https://www.olx.pl/nieruchomosci/mieszkania/wynajem/opole/";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "olx-watch")]
#[command(about = "Notify a Telegram chat about new OLX rental offers")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    #[arg(long, default_value = ".", help = "Directory holding the history file")]
    pub data_dir: String,

    #[arg(long, default_value = "history.json")]
    pub history_file: String,

    #[arg(long, default_value = "30", help = "Timeout for each HTTP request")]
    pub timeout_secs: u64,

    #[arg(long, default_value = DEFAULT_TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn history_file(&self) -> &str {
        &self.history_file
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("listing_url", &self.listing_url)?;
        validation::validate_url("telegram_api_base", &self.telegram_api_base)?;
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_path("history_file", &self.history_file)?;
        validation::validate_non_empty_string("history_file", &self.history_file)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, 600)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

/// Messaging credentials, read once at startup.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

impl TelegramConfig {
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: api_base.into(),
        }
    }

    /// Missing variables are not an error here: sends will simply be
    /// rejected and reported as failed.
    pub fn from_env(api_base: impl Into<String>) -> Self {
        Self {
            bot_token: env_or_warn(BOT_TOKEN_VAR),
            chat_id: env_or_warn(CHAT_ID_VAR),
            api_base: api_base.into(),
        }
    }

    pub fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

// The token is a credential; keep it out of debug logs.
impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn env_or_warn(name: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            tracing::warn!("{} is not set; notifications will fail", name);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_url() {
        let config = TelegramConfig::new("123:abc", "42", "https://api.telegram.org/");
        assert_eq!(
            config.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TelegramConfig::new("123:secret", "42", DEFAULT_TELEGRAM_API_BASE);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("42"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_defaults_validate() {
        let config = CliConfig::parse_from(["olx-watch"]);
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.history_file, "history.json");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_zero_timeout() {
        let config = CliConfig::parse_from(["olx-watch", "--timeout-secs", "0"]);
        assert!(config.validate().is_err());
    }
}
