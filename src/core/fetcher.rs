use crate::core::parser::ListingParser;
use crate::core::{ConfigProvider, OfferSource};
use crate::domain::model::Offer;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;

/// Sent instead of a browser UA; the listing site blocks unknown clients
/// less often when they look like a search engine crawler.
pub const CRAWLER_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

pub struct OlxScraper<C: ConfigProvider> {
    config: C,
    client: Client,
    parser: ListingParser,
}

impl<C: ConfigProvider> OlxScraper<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(CRAWLER_USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;
        let parser = ListingParser::new(config.listing_url())?;

        Ok(Self {
            config,
            client,
            parser,
        })
    }
}

#[async_trait]
impl<C: ConfigProvider> OfferSource for OlxScraper<C> {
    async fn fetch_offers(&self) -> Result<Vec<Offer>> {
        let url = self.config.listing_url();

        tracing::debug!("Fetching listing page: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Listing response status: {}", status);

        if !status.is_success() {
            return Err(WatchError::FetchError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Listing page is {} bytes", body.len());

        self.parser.parse(&body)
    }
}
