//! One-hop crawling: summarize a start page, then the best links on it.
//!
//! Transport is left to the caller through [`PageFetcher`]. Pages are
//! visited one at a time in rank order, and a failing link is recorded
//! without stopping the rest.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{info, warn};
use url::Url;

use crate::document::Document;
use crate::error::{CrawlError, ExtractionError, FetchError};
use crate::reader::Extractor;
use crate::text::word_count;

const MIN_LINKS: usize = 1;
const MAX_LINKS: usize = 25;
const DEFAULT_LINKS: usize = 8;
const MIN_WORDS_PER_PAGE: usize = 80;
const MAX_WORDS_PER_PAGE: usize = 400;
const DEFAULT_WORDS_PER_PAGE: usize = 200;

/// A page as delivered by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects.
    pub final_url: String,
    pub html: String,
    pub content_type: Option<String>,
}

/// Blocking page retrieval. Timeouts, headers and retries are the
/// implementor's business.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    max_links: usize,
    words_per_page: usize,
}

impl CrawlSettings {
    /// Clamps both limits into their supported ranges.
    pub fn new(max_links: usize, words_per_page: usize) -> Self {
        Self {
            max_links: max_links.clamp(MIN_LINKS, MAX_LINKS),
            words_per_page: words_per_page.clamp(MIN_WORDS_PER_PAGE, MAX_WORDS_PER_PAGE),
        }
    }

    pub fn max_links(&self) -> usize {
        self.max_links
    }

    pub fn words_per_page(&self) -> usize {
        self.words_per_page
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::new(DEFAULT_LINKS, DEFAULT_WORDS_PER_PAGE)
    }
}

/// Outcome of visiting one linked page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    Failed(String),
}

impl PageStatus {
    fn from_fetch_error(error: &FetchError) -> Self {
        match error {
            FetchError::Timeout { .. } => Self::Failed("timeout".to_string()),
            FetchError::Connection { reason, .. } => Self::Failed(format!("connection {reason}")),
            FetchError::Status { status, .. } => Self::Failed(format!("HTTP {status}")),
            FetchError::Other { reason, .. } => Self::Failed(reason.clone()),
        }
    }

    fn from_extraction_error(error: &ExtractionError) -> Self {
        match error {
            ExtractionError::EmptyExtraction { .. } => {
                Self::Failed("empty extracted text".to_string())
            }
            other => Self::Failed(other.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Failed(reason) => write!(f, "error: {reason}"),
        }
    }
}

impl Serialize for PageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedPage {
    /// 1-based position in the ranked link list.
    pub rank: usize,
    pub anchor_text: String,
    pub url: String,
    #[serde(rename = "page_summary")]
    pub summary: String,
    #[serde(rename = "page_words")]
    pub words: usize,
    #[serde(rename = "page_status")]
    pub status: PageStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    #[serde(rename = "url")]
    pub start_url: String,
    #[serde(rename = "start_page_summary")]
    pub start_summary: String,
    #[serde(rename = "start_page_words")]
    pub start_words: usize,
    pub results: Vec<LinkedPage>,
    pub links_processed: usize,
    pub crawled_at: DateTime<Utc>,
}

/// Drives a one-hop crawl with a caller-supplied fetcher.
pub struct LinkFollower<'a, F> {
    extractor: &'a Extractor,
    fetcher: F,
    settings: CrawlSettings,
}

impl<'a, F: PageFetcher> LinkFollower<'a, F> {
    pub fn new(extractor: &'a Extractor, fetcher: F, settings: CrawlSettings) -> Self {
        Self {
            extractor,
            fetcher,
            settings,
        }
    }

    /// Summarizes `start_url` and up to `max_links` of its best links.
    ///
    /// Only start-page problems fail the crawl. A start page with no
    /// readable text still has its links followed.
    pub fn crawl(&self, start_url: &str) -> Result<CrawlReport, CrawlError> {
        validate_start_url(start_url)?;

        let page = self.fetcher.fetch(start_url)?;
        let document = Document {
            html: page.html,
            url: page.final_url,
            content_type: page.content_type,
        };

        let start_summary = match self.extractor.extract_document(&document) {
            Ok(result) => result.summary(self.settings.words_per_page),
            Err(ExtractionError::EmptyExtraction { .. }) => {
                warn!(url = %document.url, "start page has no readable text");
                String::new()
            }
            Err(error) => return Err(error.into()),
        };

        let links = self.extractor.score_links(
            &document.html,
            &document.url,
            self.settings.max_links,
        );
        info!(
            url = %document.url,
            links = links.len(),
            "start page summarized"
        );

        let results = links
            .into_iter()
            .enumerate()
            .map(|(i, link)| self.visit(i + 1, link.absolute_url, link.anchor_text))
            .collect::<Vec<_>>();
        info!(
            url = %document.url,
            visited = results.len(),
            ok = results.iter().filter(|page| page.status.is_ok()).count(),
            "crawl finished"
        );

        Ok(CrawlReport {
            start_words: word_count(&start_summary),
            start_url: document.url,
            start_summary,
            links_processed: results.len(),
            results,
            crawled_at: Utc::now(),
        })
    }

    fn visit(&self, rank: usize, url: String, anchor_text: String) -> LinkedPage {
        let failed = |url: String, status: PageStatus| {
            warn!(rank, url = %url, status = %status, "linked page failed");
            LinkedPage {
                rank,
                anchor_text: anchor_text.clone(),
                url,
                summary: String::new(),
                words: 0,
                status,
            }
        };

        let page = match self.fetcher.fetch(&url) {
            Ok(page) => page,
            Err(error) => return failed(url, PageStatus::from_fetch_error(&error)),
        };

        let document = Document {
            html: page.html,
            url: page.final_url,
            content_type: page.content_type,
        };
        match self.extractor.extract_document(&document) {
            Ok(result) => {
                let summary = result.summary(self.settings.words_per_page);
                let words = word_count(&summary);
                info!(rank, url = %document.url, words, "linked page summarized");
                LinkedPage {
                    rank,
                    anchor_text: anchor_text.clone(),
                    url: document.url,
                    summary,
                    words,
                    status: PageStatus::Ok,
                }
            }
            Err(error) => failed(document.url, PageStatus::from_extraction_error(&error)),
        }
    }
}

fn validate_start_url(start_url: &str) -> Result<(), CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidStartUrl {
        url: start_url.to_string(),
        reason,
    };

    let parsed = Url::parse(start_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("only http(s) URLs are supported".to_string()));
    }
    Ok(())
}
