use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One directory listing's contact block. Every field except the address
/// may be absent; phones keep the order they appeared on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRecord {
    pub address: String,
    pub phones: Vec<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// What a crawl run produced, including the partial result set when the
/// run was aborted or interrupted before the last page.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub records: Vec<ContactRecord>,
    pub pages_completed: usize,
    pub aborted: Option<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("cf-email payload has odd length")]
    OddLength,
    #[error("cf-email payload is missing the key byte")]
    MissingKey,
    #[error("cf-email payload contains non-hex characters")]
    InvalidHex,
}
