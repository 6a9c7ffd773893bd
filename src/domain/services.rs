use crate::domain::model::Offer;
use std::collections::HashSet;

/// Offers from `current` whose link is not in `history`, in `current` order.
pub fn new_offers(current: &[Offer], history: &[Offer]) -> Vec<Offer> {
    let seen: HashSet<&str> = history.iter().map(|offer| offer.link.as_str()).collect();

    current
        .iter()
        .filter(|offer| !seen.contains(offer.link.as_str()))
        .cloned()
        .collect()
}

pub fn format_offer_message(offer: &Offer) -> String {
    format!("🏠 <b>{}</b>\n{}", escape_html(&offer.title), offer.link)
}

pub fn format_failure_message(error: &impl std::fmt::Display) -> String {
    format!("❌ OLX scraping failed: {}", escape_html(&error.to_string()))
}

// The messaging API rejects HTML-mode text with stray markup characters.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
