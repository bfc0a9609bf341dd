use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use scraper::Html;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Config;
use crate::extract::{DetailExtractor, ListingExtractor};
use crate::fetcher::PageFetcher;
use crate::models::{ContactRecord, CrawlOutcome, Result};

/// Walks the paginated search results, resolving every listing to its
/// detail page and accumulating the extracted contact records.
pub struct DirectoryCrawler {
    config: Config,
    base: Url,
    fetcher: PageFetcher,
    listings: ListingExtractor,
    details: DetailExtractor,
    shutdown: Arc<AtomicBool>,
}

impl DirectoryCrawler {
    pub fn new(config: Config, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let base = Url::parse(&config.site.base_url)?;
        let fetcher = PageFetcher::new(&config);

        Ok(Self {
            config,
            base,
            fetcher,
            listings: ListingExtractor::new(),
            details: DetailExtractor::new(),
            shutdown,
        })
    }

    /// Runs the full crawl. A list-page fetch failure ends the run —
    /// pagination is sequential, so skipping a page would silently lose
    /// its listings — but whatever was accumulated up to that point is
    /// still returned for export. Detail-page failures only skip the one
    /// listing.
    pub async fn run(&self) -> CrawlOutcome {
        let started = Instant::now();
        let total_pages = self.config.site.total_pages;
        let mut outcome = CrawlOutcome::default();

        info!("Starting crawl of {} list pages", total_pages);

        for page_number in 1..=total_pages {
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Interrupted, stopping before page {}", page_number);
                break;
            }

            let page_url = self.config.site.page_url(page_number);
            let body = match self.fetcher.fetch(&page_url).await {
                Ok(body) => body,
                Err(e) => {
                    error!("Failed to fetch list page {}: {}", page_number, e);
                    outcome.aborted = Some(format!("list page {page_number}: {e}"));
                    break;
                }
            };

            let listing_urls = {
                let page = Html::parse_document(&body);
                self.listings.extract_urls(&page, &self.base)
            };
            debug!(
                "Page {}: {} listings with detail pages",
                page_number,
                listing_urls.len()
            );

            let records = self.scrape_details(&listing_urls).await;
            outcome.records.extend(records);
            outcome.pages_completed += 1;

            info!(
                "Progress: {}/{} pages, {} contacts",
                outcome.pages_completed,
                total_pages,
                outcome.records.len()
            );

            if page_number < total_pages && !self.shutdown.load(Ordering::Relaxed) {
                tokio::time::sleep(Duration::from_millis(self.config.crawl.page_delay_ms)).await;
            }
        }

        info!(
            "Crawl finished in {:.2}s with {} contacts",
            started.elapsed().as_secs_f64(),
            outcome.records.len()
        );
        outcome
    }

    /// Fetches and extracts a page's detail listings through a bounded
    /// pool. `buffered` yields results in input order, so records come
    /// out in page-then-listing order no matter which fetch finishes
    /// first.
    async fn scrape_details(&self, urls: &[String]) -> Vec<ContactRecord> {
        stream::iter(urls)
            .map(|url| self.scrape_detail(url))
            .buffered(self.config.crawl.detail_concurrency.max(1))
            .filter_map(|record| async move { record })
            .collect()
            .await
    }

    async fn scrape_detail(&self, url: &str) -> Option<ContactRecord> {
        if self.shutdown.load(Ordering::Relaxed) {
            return None;
        }

        let body = self.fetch_detail(url).await?;
        let page = Html::parse_document(&body);
        let record = self.details.extract_contact(&page);
        if record.is_none() {
            debug!("No contact block on {}", url);
        }
        record
    }

    /// Detail fetches get a bounded retry with linear backoff; a page
    /// that still fails is skipped rather than ending the run.
    async fn fetch_detail(&self, url: &str) -> Option<String> {
        let retries = self.config.crawl.detail_retries;

        for attempt in 0..=retries {
            if attempt > 0 {
                let backoff = self.config.crawl.retry_backoff_ms * u64::from(attempt);
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            match self.fetcher.fetch(url).await {
                Ok(body) => return Some(body),
                Err(e) if attempt < retries => {
                    debug!("Retrying {} after fetch error: {}", url, e);
                }
                Err(e) => {
                    warn!("Skipping detail page {}: {}", url, e);
                }
            }
        }

        None
    }
}
