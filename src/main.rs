use clap::Parser;
use olx_watch::core::ConfigProvider;
use olx_watch::utils::{logger, validation::Validate};
use olx_watch::{
    CliConfig, JsonHistory, LocalStorage, OlxScraper, TelegramConfig, TelegramNotifier,
    WatchEngine, WatchError,
};

// Every network call is awaited in sequence; one thread is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting olx-watch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let telegram = TelegramConfig::from_env(config.telegram_api_base.clone());
    let notifier = TelegramNotifier::new(telegram, config.request_timeout())?;
    let history = JsonHistory::new(
        LocalStorage::new(config.data_dir.clone()),
        config.history_file(),
    );
    let source = match OlxScraper::new(config) {
        Ok(source) => source,
        Err(e) => exit_with(&e),
    };

    let engine = WatchEngine::new(source, history, notifier);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Done: {} offers on page, {} new, {} notified, {} failed, history {}",
                report.fetched,
                report.new_offers,
                report.notified,
                report.failed_notifications,
                if report.history_written {
                    "updated"
                } else {
                    "unchanged"
                }
            );
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &WatchError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
