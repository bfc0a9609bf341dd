use std::io;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::FetchError;

pub struct PageFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl PageFetcher {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.crawl.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        let user_agents = match load_user_agents(&config.identity.user_agent_file) {
            Ok(agents) => agents,
            Err(e) => {
                warn!(
                    "Could not read {}: {}. Falling back to a single user agent.",
                    config.identity.user_agent_file, e
                );
                vec![config.identity.fallback_user_agent.clone()]
            }
        };

        Self {
            client,
            user_agents,
        }
    }

    /// Fetches a page body with a freshly rotated identity. Non-2xx
    /// responses count as fetch failures.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.random_agent())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    fn random_agent(&self) -> &str {
        &self.user_agents[fastrand::usize(..self.user_agents.len())]
    }
}

fn load_user_agents(path: &str) -> io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let agents: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if agents.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "user agent file contains no usable entries",
        ));
    }

    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("contact_scraper_{}_{}", std::process::id(), name))
    }

    #[test]
    fn reads_one_agent_per_non_empty_line() {
        let path = temp_path("agents.txt");
        std::fs::write(&path, "Mozilla/5.0 (X11; Linux x86_64)\n\n  Mozilla/5.0 (Windows NT 10.0)  \n").unwrap();

        let agents = load_user_agents(path.to_str().unwrap()).unwrap();
        assert_eq!(
            agents,
            vec![
                "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
                "Mozilla/5.0 (Windows NT 10.0)".to_string(),
            ]
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_file_is_an_error() {
        let path = temp_path("empty_agents.txt");
        std::fs::write(&path, "\n  \n").unwrap();

        assert!(load_user_agents(path.to_str().unwrap()).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_user_agents("definitely/not/here.txt").is_err());
    }
}
