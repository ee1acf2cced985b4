//! Listing page parser
//!
//! Turns the HTML of one catalog page into candidate records. Extraction is
//! best-effort per field: a missing sub-element becomes an empty string and
//! never aborts the page.

use crate::config::{compile_selector, SelectorConfig};
use crate::record::CandidateRecord;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Compiled selectors for the listing structure
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    item: Selector,
    chart: Selector,
    name: Selector,
    link: Selector,
    price: Selector,
    score: Selector,
}

impl ListingSelectors {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(ListingSelectors)` - All selectors compiled
    /// * `Err(ConfigError)` - The first selector that failed to compile
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            item: compile_selector(&config.item)?,
            chart: compile_selector(&config.chart)?,
            name: compile_selector(&config.name)?,
            link: compile_selector(&config.link)?,
            price: compile_selector(&config.price)?,
            score: compile_selector(&config.score)?,
        })
    }
}

/// Parses a listing page and extracts one candidate per list item
///
/// # Extraction Rules
///
/// | Field | Source (inside each chart of the item) |
/// |-------|----------------------------------------|
/// | name  | text of the name element, trimmed |
/// | link  | `href` of the first link element, as found |
/// | price | text of the price element, trimmed, `$` prefix dropped |
/// | score | text of the score element, trimmed |
///
/// When a selector matches several elements their text is joined in
/// document order. Records are returned in document order; a page without
/// list items yields an empty vector.
///
/// # Example
///
/// ```
/// use cellar_crawl::config::SelectorConfig;
/// use cellar_crawl::crawler::{parse_listing, ListingSelectors};
///
/// let html = r#"<div id="content"><div class="productListingWidget">
///   <div class="product_listing_container"><ul><li><div class="productChart">
///     <div class="product_name"><a href="/w/1">Wine A</a></div>
///     <div class="product_price"><span class="price">$10.00</span></div>
///     <div class="product_score"><span class="score">4.5</span></div>
///   </div></li></ul></div></div></div>"#;
///
/// let selectors = ListingSelectors::compile(&SelectorConfig::default()).unwrap();
/// let records = parse_listing(html, &selectors);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].price(), "10.00");
/// ```
pub fn parse_listing(html: &str, selectors: &ListingSelectors) -> Vec<CandidateRecord> {
    let document = Html::parse_document(html);

    let records: Vec<CandidateRecord> = document
        .select(&selectors.item)
        .map(|item| extract_record(item, selectors))
        .collect();

    tracing::trace!("Listing parser found {} items", records.len());
    records
}

/// Extracts the four fields of a single list item
fn extract_record(item: ElementRef<'_>, selectors: &ListingSelectors) -> CandidateRecord {
    let charts: Vec<ElementRef<'_>> = item.select(&selectors.chart).collect();

    let name = collect_text(&matched(&charts, &selectors.name));
    // Only the first matching anchor is consulted, even if it has no href
    let link = charts
        .iter()
        .flat_map(|chart| chart.select(&selectors.link))
        .next()
        .and_then(|element| element.value().attr("href"))
        .unwrap_or_default();
    let price = collect_text(&matched(&charts, &selectors.price));
    let score = collect_text(&matched(&charts, &selectors.score));

    CandidateRecord::new(name, link, price, score)
}

/// Elements matching `selector` under any chart, each listed once
///
/// Charts can nest, in which case an inner match is reachable from every
/// enclosing chart.
fn matched<'a>(charts: &[ElementRef<'a>], selector: &Selector) -> Vec<ElementRef<'a>> {
    let mut seen = HashSet::new();
    charts
        .iter()
        .flat_map(|chart| chart.select(selector))
        .filter(|element| seen.insert(element.id()))
        .collect()
}

/// Concatenates the text of the given elements
fn collect_text(elements: &[ElementRef<'_>]) -> String {
    elements
        .iter()
        .flat_map(|element| element.text())
        .collect()
}
