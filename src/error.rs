//! Typed errors for extraction, configuration and the crawl driver.

use thiserror::Error;

/// Errors surfaced by the extraction pipeline.
///
/// Node-level markup problems never appear here: the HTML parser recovers
/// them and the pipeline skips whatever it cannot read.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The payload is not HTML and was rejected before parsing.
    #[error("unsupported content type: {content_type}")]
    UnsupportedContent { content_type: String },

    /// Every strategy in the fallback ladder came back empty.
    #[error("no readable text could be extracted from {url}")]
    EmptyExtraction { url: String },
}

/// Errors raised while building components from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} pattern: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by a [`PageFetcher`](crate::crawl::PageFetcher).
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    #[error("connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("fetching {url} failed: {reason}")]
    Other { url: String, reason: String },
}

/// Errors that abort a crawl. Only the start page can produce these.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid start URL {url}: {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("start page fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("start page extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

pub type Result<T, E = ExtractionError> = std::result::Result<T, E>;
