use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawl: CrawlConfig,
    pub identity: IdentityConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Origin that relative detail-page paths are resolved against.
    pub base_url: String,

    /// Search URL template; `{page}` is replaced with the page number.
    pub search_url: String,

    /// The site does not expose its result count, so the page total is
    /// supplied externally rather than discovered.
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    pub timeout_seconds: u64,
    pub page_delay_ms: u64,
    pub detail_concurrency: usize,
    pub detail_retries: u32,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub user_agent_file: String,
    pub fallback_user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,

    /// Overrides the timestamped default filename when set.
    pub filename: Option<String>,
}

impl SiteConfig {
    pub fn page_url(&self, page: u32) -> String {
        self.search_url.replace("{page}", &page.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig {
                base_url: "https://www.proveedores.com".to_string(),
                search_url: "https://www.proveedores.com/search?s=Fresas&sev_slug=fresas&sev_id=3809&geo&geo_slug&ae2_id=++++&pop_id&sa=1&tp_id&sb=1&page={page}".to_string(),
                total_pages: 13,
            },
            crawl: CrawlConfig {
                timeout_seconds: 10,
                page_delay_ms: 500,
                detail_concurrency: 4,
                detail_retries: 2,
                retry_backoff_ms: 1000,
            },
            identity: IdentityConfig {
                user_agent_file: "user_agent.txt".to_string(),
                fallback_user_agent: "Mozilla/5.0".to_string(),
            },
            output: OutputConfig {
                directory: "data".to_string(),
                filename: None,
            },
        }
    }
}

pub async fn load_config(path: &str) -> crate::models::Result<Config> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
