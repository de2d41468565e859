//! Readable-content extraction and link prioritization for arbitrary HTML.
//!
//! [`api::extract`] turns a page into body text through a fallback ladder
//! (readability, container paragraphs, whole-document paragraphs).
//! [`api::score_links`] ranks the page's outbound links by how likely they
//! lead to more content. [`crawl::LinkFollower`] combines both for one-hop
//! crawls over a caller-supplied fetcher.

pub mod api;
pub mod config;
pub mod container;
pub mod crawl;
pub mod document;
pub mod error;
pub mod links;
pub mod logging;
pub mod models;
pub mod paragraphs;
pub mod prune;
pub mod readability;
pub mod reader;
pub mod summarize;
pub mod text;

#[cfg(test)]
mod pipeline_tests;

pub use api::{extract, score_links};
pub use config::ExtractorConfig;
pub use document::Document;
pub use error::{ConfigError, CrawlError, ExtractionError, FetchError};
pub use models::{ExtractionResult, LinkCandidate, Strategy};
pub use reader::Extractor;
pub use summarize::summarize;
