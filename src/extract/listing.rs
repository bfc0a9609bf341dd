use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::anchor::locate;

pub const MAIN_CONTENT_MARKER: &str = "Main Content";

pub struct ListingExtractor {
    href_regex: Regex,
    span_selector: Selector,
}

impl ListingExtractor {
    pub fn new() -> Self {
        Self {
            href_regex: Regex::new(r"window\.location\.href='([^']*)'").unwrap(),
            span_selector: Selector::parse("span").unwrap(),
        }
    }

    /// Resolves each listing block on a search-results page to its
    /// detail-page URL, in page order. The site makes listings clickable
    /// through a span's onclick handler rather than a real link; blocks
    /// without one have no detail page and are skipped.
    pub fn extract_urls(&self, results_page: &Html, base: &Url) -> Vec<String> {
        let Some(main_content) = locate(MAIN_CONTENT_MARKER, results_page.tree.root()) else {
            debug!("Results page has no main content block");
            return Vec::new();
        };

        main_content
            .children()
            .filter_map(ElementRef::wrap)
            .filter_map(|block| self.listing_url(block, base))
            .collect()
    }

    fn listing_url(&self, block: ElementRef, base: &Url) -> Option<String> {
        let span = block.select(&self.span_selector).next()?;
        let onclick = span.value().attr("onclick")?;
        let path = self.href_regex.captures(onclick)?.get(1)?.as_str();
        if path.is_empty() {
            return None;
        }
        base.join(path).ok().map(|url| url.to_string())
    }
}
