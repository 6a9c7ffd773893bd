//! Extracts offers from the listing page markup.
//!
//! The selectors are pinned to the site's current layout. When the layout
//! changes, parsing fails with a structure error instead of silently
//! reporting an empty listing.

use crate::domain::model::Offer;
use crate::utils::error::{Result, WatchError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Offer anchors, nested in the per-offer wrapper.
pub const OFFER_SELECTOR: &str = "div.offer-wrapper a.link";

/// Shown by the site instead of the offer table when a search has no results.
pub const EMPTY_LISTING_SELECTOR: &str = "div.emptynew";

pub struct ListingParser {
    offer_selector: Selector,
    empty_selector: Selector,
    origin: String,
}

impl ListingParser {
    /// `page_url` is the address the page was fetched from; root-relative
    /// links are resolved against its origin.
    pub fn new(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url).map_err(|e| WatchError::InvalidConfigValueError {
            field: "listing_url".to_string(),
            value: page_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            offer_selector: parse_selector(OFFER_SELECTOR)?,
            empty_selector: parse_selector(EMPTY_LISTING_SELECTOR)?,
            origin: url.origin().ascii_serialization(),
        })
    }

    pub fn parse(&self, html: &str) -> Result<Vec<Offer>> {
        let document = Html::parse_document(html);

        let mut offers = Vec::new();
        let mut matched = 0usize;

        for element in document.select(&self.offer_selector) {
            matched += 1;
            match self.extract_offer(element) {
                Some(offer) => offers.push(offer),
                None => tracing::warn!(
                    "Skipping offer #{} without a usable href: {:?}",
                    matched,
                    element_title(element)
                ),
            }
        }

        if matched == 0 {
            if document.select(&self.empty_selector).next().is_some() {
                tracing::info!("Listing page reports no offers");
                return Ok(offers);
            }
            return Err(WatchError::structure(format!(
                "no elements match '{}' and the page has no empty-results marker",
                OFFER_SELECTOR
            )));
        }

        if offers.is_empty() {
            return Err(WatchError::structure(format!(
                "all {} elements matching '{}' lack an href",
                matched, OFFER_SELECTOR
            )));
        }

        tracing::debug!("Parsed {} of {} matched offers", offers.len(), matched);
        Ok(offers)
    }

    fn extract_offer(&self, element: ElementRef<'_>) -> Option<Offer> {
        let href = element.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        Some(Offer::new(element_title(element), self.absolutize(href)))
    }

    /// Root-relative links get the site origin; anything else is kept as is.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.origin, href)
        } else {
            href.to_string()
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| WatchError::structure(format!("invalid selector '{}': {}", selector, e)))
}

// Each text node trimmed, empty ones dropped, joined without separator.
fn element_title(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
