//! Maps search-results fetcher
//!
//! Fetches the results page for one sub-search and extracts business cards
//! with per-field CSS selectors. Every field except the name is optional:
//! a card that simply doesn't carry a field still produces a place.

use crate::fetch::{build_http_client, FetchError, FetchResult, Fetcher, SearchTask};
use crate::geo::GeoPoint;
use crate::places::Place;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const DEFAULT_BASE: &str = "https://www.google.com/maps/search/";

/// HTTP-backed fetcher for maps search-result pages
pub struct MapsFetcher {
    client: Client,
    base: Url,
}

impl MapsFetcher {
    pub fn new() -> FetchResult<Self> {
        let base = Url::parse(DEFAULT_BASE).map_err(|e| FetchError::Url(e.to_string()))?;
        Ok(Self {
            client: build_http_client()?,
            base,
        })
    }

    /// Fetcher targeting a non-default base URL (used against test servers)
    pub fn with_base_url(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// The search-results URL for one task: `<base>/<query>/@<lat>,<lon>,15z`
    fn search_url(&self, task: &SearchTask) -> FetchResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::Url("base URL cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.push(&task.query);
            segments.push(&format!(
                "@{:.6},{:.6},15z",
                task.center.lat, task.center.lon
            ));
        }
        Ok(url)
    }
}

#[async_trait]
impl Fetcher for MapsFetcher {
    async fn fetch(&self, task: &SearchTask) -> FetchResult<Vec<Place>> {
        let url = self.search_url(task)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(extract_places(&body, task.center))
    }
}

/// Extracts every business card in the page
///
/// Cards without a name are skipped; the name is the only required field.
pub fn extract_places(html: &str, point: GeoPoint) -> Vec<Place> {
    let document = Html::parse_document(html);

    let card_selector = match Selector::parse("div.Nv2PK") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&card_selector)
        .filter_map(|card| extract_place(card, point))
        .collect()
}

/// Extracts one place from a result card
///
/// Each field is looked up independently; a missing element leaves the
/// field absent rather than failing the card.
fn extract_place(card: ElementRef<'_>, point: GeoPoint) -> Option<Place> {
    let name = select_text(card, "div.qBF1Pd.fontHeadlineSmall")?;

    let rating = select_text(card, "span.MW4etd")
        .and_then(|text| text.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let review_count = select_text(card, "span.UY7F9")
        .and_then(|text| parse_review_count(&text))
        .unwrap_or(0);

    // The first detail line reads "<category> · <address>"
    let address = select_text(card, "div.W4Efsd:nth-child(1)")
        .map(|line| address_from_line(&line))
        .unwrap_or_default();

    // The second detail line reads "<hours> · <more>" when hours are known
    let hours = select_text(card, "div.W4Efsd:nth-child(2)").and_then(|line| hours_from_line(&line));

    let phone = select_text(card, "div.W4Efsd span.UsdlK");

    let website = select_attr(card, "a.lcr4fd", "href");

    Some(Place {
        name,
        address,
        rating,
        review_count,
        coordinates: point,
        hours,
        phone,
        website,
    })
}

/// Text of the first element matching `selector` under `card`, trimmed
fn select_text(card: ElementRef<'_>, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let text = card.select(&sel).next()?.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Attribute of the first element matching `selector` under `card`
fn select_attr(card: ElementRef<'_>, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    card.select(&sel)
        .next()?
        .value()
        .attr(attr)
        .map(|v| v.to_string())
}

/// Parses "(1,204)" into 1204
fn parse_review_count(text: &str) -> Option<u32> {
    text.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .replace(',', "")
        .parse()
        .ok()
}

/// The address is the last "·"-separated segment of the detail line
fn address_from_line(line: &str) -> String {
    line.rsplit('·')
        .next()
        .map(|part| part.trim().to_string())
        .unwrap_or_default()
}

/// Hours are the first segment of a multi-part detail line
fn hours_from_line(line: &str) -> Option<String> {
    let mut parts = line.split('·');
    let first = parts.next()?.trim().to_string();
    // A single-segment line is something else (an address-only card)
    parts.next()?;
    if first.is_empty() {
        None
    } else {
        Some(first)
    }
}
