use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod crawler;
mod export;
mod extract;
mod fetcher;
mod models;

use config::{load_config, Config};
use crawler::DirectoryCrawler;
use export::ContactExporter;
use models::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contact_scraper=info")),
        )
        .init();

    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Ctrl+C stops new fetches; whatever was gathered still gets exported.
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, finishing up...");
                shutdown.store(true, Ordering::Relaxed);
            }
        });
    }

    let crawler = DirectoryCrawler::new(config.clone(), shutdown)?;
    let outcome = crawler.run().await;

    if outcome.records.is_empty() {
        warn!("No contacts collected; nothing to export");
    } else {
        let exporter = ContactExporter::new(config.output.clone());
        let path = exporter.export_to_csv(&outcome.records)?;
        info!(
            "Saved {} contacts to {}",
            outcome.records.len(),
            path.display()
        );
    }

    if let Some(reason) = outcome.aborted {
        error!("Crawl aborted: {}", reason);
        return Err(reason.into());
    }

    Ok(())
}
