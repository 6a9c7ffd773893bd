use anyhow::Result;
use httpmock::prelude::*;
use olx_watch::core::ConfigProvider;
use olx_watch::{
    JsonHistory, LocalStorage, Offer, OlxScraper, TelegramConfig, TelegramNotifier, WatchEngine,
    WatchError,
};
use std::time::Duration;
use tempfile::TempDir;

const LISTING: &str = include_str!("fixtures/listing.html");

struct TestConfig {
    listing_url: String,
}

impl ConfigProvider for TestConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn history_file(&self) -> &str {
        "history.json"
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(5)
    }
}

type Engine = WatchEngine<OlxScraper<TestConfig>, JsonHistory<LocalStorage>, TelegramNotifier>;

fn engine(server: &MockServer, data_dir: &TempDir) -> Result<Engine> {
    let source = OlxScraper::new(TestConfig {
        listing_url: server.url("/nieruchomosci/mieszkania/wynajem/opole/"),
    })?;
    let history = JsonHistory::new(
        LocalStorage::new(data_dir.path().to_str().unwrap().to_string()),
        "history.json",
    );
    let notifier = TelegramNotifier::new(
        TelegramConfig::new("42:token", "-100123", server.base_url()),
        Duration::from_secs(5),
    )?;
    Ok(WatchEngine::new(source, history, notifier))
}

fn read_history(data_dir: &TempDir) -> Result<Vec<Offer>> {
    let raw = std::fs::read(data_dir.path().join("history.json"))?;
    Ok(serde_json::from_slice(&raw)?)
}

#[tokio::test]
async fn test_end_to_end_first_run_notifies_everything() -> Result<()> {
    let data_dir = TempDir::new()?;
    let server = MockServer::start();

    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/nieruchomosci/mieszkania/wynajem/opole/");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(LISTING);
    });
    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/bot42:token/sendMessage");
        then.status(200).json_body(serde_json::json!({"ok": true}));
    });

    let report = engine(&server, &data_dir)?.run().await?;

    page_mock.assert();
    send_mock.assert_hits(2);
    assert_eq!(report.fetched, 2);
    assert_eq!(report.notified, 2);
    assert!(report.history_written);

    let history = read_history(&data_dir)?;
    assert_eq!(
        history,
        vec![
            Offer::new(
                "Kawalerka w centrum",
                server.url("/d/oferta/kawalerka-centrum-CID3-IDa1.html"),
            ),
            Offer::new(
                "2 pokoje & balkon",
                "https://www.otodom.pl/pl/oferta/2-pokoje-ID4b2",
            ),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_second_run_is_idempotent() -> Result<()> {
    let data_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/nieruchomosci/mieszkania/wynajem/opole/");
        then.status(200).body(LISTING);
    });
    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/bot42:token/sendMessage");
        then.status(200).json_body(serde_json::json!({"ok": true}));
    });

    let engine = engine(&server, &data_dir)?;
    engine.run().await?;
    let before = std::fs::read(data_dir.path().join("history.json"))?;

    let second = engine.run().await?;

    assert_eq!(second.new_offers, 0);
    assert!(!second.history_written);
    send_mock.assert_hits(2);
    assert_eq!(std::fs::read(data_dir.path().join("history.json"))?, before);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_history_is_replaced_not_merged() -> Result<()> {
    let data_dir = TempDir::new()?;
    let server = MockServer::start();

    let stale = Offer::new("Sold", "https://www.olx.pl/d/oferta/sold");
    let kept = Offer::new(
        "Kawalerka w centrum",
        server.url("/d/oferta/kawalerka-centrum-CID3-IDa1.html"),
    );
    std::fs::write(
        data_dir.path().join("history.json"),
        serde_json::to_vec(&vec![stale.clone(), kept.clone()])?,
    )?;

    server.mock(|when, then| {
        when.method(GET).path("/nieruchomosci/mieszkania/wynajem/opole/");
        then.status(200).body(LISTING);
    });
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot42:token/sendMessage")
            .body_contains("otodom.pl");
        then.status(200).json_body(serde_json::json!({"ok": true}));
    });

    let report = engine(&server, &data_dir)?.run().await?;

    send_mock.assert_hits(1);
    assert_eq!(report.new_offers, 1);

    let history = read_history(&data_dir)?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], kept);
    assert!(!history.contains(&stale));
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_rejected_notification_still_saves() -> Result<()> {
    let data_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/nieruchomosci/mieszkania/wynajem/opole/");
        then.status(200).body(LISTING);
    });
    server.mock(|when, then| {
        when.method(POST).path("/bot42:token/sendMessage");
        then.status(403)
            .json_body(serde_json::json!({"ok": false, "description": "Forbidden"}));
    });

    let report = engine(&server, &data_dir)?.run().await?;

    assert_eq!(report.failed_notifications, 2);
    assert!(report.history_written);
    assert_eq!(read_history(&data_dir)?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_fetch_failure_reports_and_keeps_history() -> Result<()> {
    let data_dir = TempDir::new()?;
    let server = MockServer::start();

    std::fs::write(data_dir.path().join("history.json"), b"[]")?;

    server.mock(|when, then| {
        when.method(GET).path("/nieruchomosci/mieszkania/wynajem/opole/");
        then.status(500);
    });
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot42:token/sendMessage")
            .body_contains("500");
        then.status(200).json_body(serde_json::json!({"ok": true}));
    });

    let result = engine(&server, &data_dir)?.run().await;

    assert!(matches!(
        result,
        Err(WatchError::FetchError { status: 500, .. })
    ));
    send_mock.assert_hits(1);
    assert_eq!(std::fs::read(data_dir.path().join("history.json"))?, b"[]");
    Ok(())
}
