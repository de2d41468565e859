//! Heuristic vocabularies and tunables.
//!
//! Every list and threshold the pipeline consults lives here as plain data.
//! Components take the piece they need at construction, so each one can be
//! exercised with a substituted vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Elements and attribute hints that mark page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseVocabulary {
    /// Tag names removed outright.
    #[serde(default = "default_noise_tags")]
    pub tags: Vec<String>,
    /// Substrings matched against id/class/role/aria-label.
    #[serde(default = "default_noise_hints")]
    pub hints: Vec<String>,
}

fn default_noise_tags() -> Vec<String> {
    strings(&[
        "script", "style", "noscript", "meta", "link", "nav", "header", "footer", "aside", "form",
        "button", "svg", "picture", "iframe",
    ])
}

fn default_noise_hints() -> Vec<String> {
    strings(&[
        "nav",
        "menu",
        "header",
        "footer",
        "breadcrumb",
        "cookie",
        "consent",
        "privacy",
        "account",
        "signin",
        "sign-in",
        "login",
        "register",
        "newsletter",
        "share",
        "social",
        "promo",
        "advert",
        "ads",
        "sidebar",
        "related",
        "subscribe",
        "notification",
    ])
}

impl Default for NoiseVocabulary {
    fn default() -> Self {
        Self {
            tags: default_noise_tags(),
            hints: default_noise_hints(),
        }
    }
}

/// How the article container is located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRules {
    /// CSS selectors tried in order before the hint scan.
    #[serde(default = "default_preferred_selectors")]
    pub preferred_selectors: Vec<String>,
    /// Minimum raw word count for a preferred match to be accepted.
    #[serde(default = "default_min_preferred_words")]
    pub min_preferred_words: usize,
    /// Elements considered by the hint scan.
    #[serde(default = "default_scan_selector")]
    pub scan_selector: String,
    #[serde(default = "default_content_hints")]
    pub content_hints: Vec<String>,
}

fn default_preferred_selectors() -> Vec<String> {
    strings(&["article", "main", "[role='main']"])
}

fn default_min_preferred_words() -> usize {
    60
}

fn default_scan_selector() -> String {
    "section, div, main, article".to_string()
}

fn default_content_hints() -> Vec<String> {
    strings(&[
        "content", "article", "story", "main", "body", "post", "entry", "headline", "news",
    ])
}

impl Default for ContainerRules {
    fn default() -> Self {
        Self {
            preferred_selectors: default_preferred_selectors(),
            min_preferred_words: default_min_preferred_words(),
            scan_selector: default_scan_selector(),
            content_hints: default_content_hints(),
        }
    }
}

/// Paragraph filtering rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRules {
    #[serde(default = "default_paragraph_min_words")]
    pub min_words: usize,
    /// Case-folded phrases that disqualify a paragraph.
    #[serde(default = "default_paragraph_noise")]
    pub noise_phrases: Vec<String>,
}

fn default_paragraph_min_words() -> usize {
    8
}

fn default_paragraph_noise() -> Vec<String> {
    strings(&["accessibility help", "cookie", "privacy policy", "sign in"])
}

impl Default for ParagraphRules {
    fn default() -> Self {
        Self {
            min_words: default_paragraph_min_words(),
            noise_phrases: default_paragraph_noise(),
        }
    }
}

/// Word-count thresholds driving the fallback ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderThresholds {
    /// Below this the primary result triggers a whole-document retry.
    #[serde(default = "default_primary_min_words")]
    pub primary_min_words: usize,
    /// Below this the readability text is used even under its own bar.
    #[serde(default = "default_whole_document_min_words")]
    pub whole_document_min_words: usize,
    /// At or above this the readability text wins outright.
    #[serde(default = "default_readability_min_words")]
    pub readability_min_words: usize,
}

fn default_primary_min_words() -> usize {
    60
}

fn default_whole_document_min_words() -> usize {
    40
}

fn default_readability_min_words() -> usize {
    80
}

impl Default for LadderThresholds {
    fn default() -> Self {
        Self {
            primary_min_words: default_primary_min_words(),
            whole_document_min_words: default_whole_document_min_words(),
            readability_min_words: default_readability_min_words(),
        }
    }
}

/// Vocabulary consulted when scoring outbound links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkVocabulary {
    /// Path substrings suggesting an article.
    #[serde(default = "default_content_path_tokens")]
    pub content_path_tokens: Vec<String>,
    /// Substrings of path or anchor text suggesting a utility page.
    #[serde(default = "default_non_content_hints")]
    pub non_content_hints: Vec<String>,
    /// Anchor texts (case-folded, exact) that carry no signal.
    #[serde(default = "default_low_signal_anchor_text")]
    pub low_signal_anchor_text: Vec<String>,
    /// Top-level section index paths.
    #[serde(default = "default_section_paths")]
    pub section_paths: Vec<String>,
    /// Regex over the lowercased path marking live pages and topic indexes.
    #[serde(default = "default_index_path_pattern")]
    pub index_path_pattern: String,
    /// Regex over the lowercased path marking a concrete article.
    #[serde(default = "default_article_id_pattern")]
    pub article_id_pattern: String,
}

fn default_content_path_tokens() -> Vec<String> {
    strings(&["/news/", "/article", "/story", "/live", "/202"])
}

fn default_non_content_hints() -> Vec<String> {
    strings(&[
        "login",
        "sign-in",
        "signin",
        "register",
        "account",
        "privacy",
        "cookies",
        "terms",
        "contact",
        "help",
        "newsletter",
        "podcast",
        "audio",
        "video",
        "weather",
        "sport",
    ])
}

fn default_low_signal_anchor_text() -> Vec<String> {
    strings(&[
        "home",
        "menu",
        "more",
        "sign in",
        "register",
        "login",
        "account",
        "notifications",
    ])
}

fn default_section_paths() -> Vec<String> {
    strings(&[
        "/", "/news", "/sport", "/weather", "/iplayer", "/sounds", "/food", "/travel", "/culture",
    ])
}

fn default_index_path_pattern() -> String {
    r"/news/(live|topics?)(/|$)".to_string()
}

fn default_article_id_pattern() -> String {
    r"/news/articles/[a-z0-9]+".to_string()
}

impl Default for LinkVocabulary {
    fn default() -> Self {
        Self {
            content_path_tokens: default_content_path_tokens(),
            non_content_hints: default_non_content_hints(),
            low_signal_anchor_text: default_low_signal_anchor_text(),
            section_paths: default_section_paths(),
            index_path_pattern: default_index_path_pattern(),
            article_id_pattern: default_article_id_pattern(),
        }
    }
}

/// Score deltas for link ranking. The numbers are observed behavior, not
/// derived values; tune them here rather than in the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkWeights {
    pub same_site: i32,
    pub deep_path: i32,
    pub deep_path_min_segments: usize,
    pub content_path: i32,
    pub descriptive_anchor: i32,
    pub descriptive_anchor_min_words: usize,
    pub descriptive_anchor_max_words: usize,
    pub bare_anchor: i32,
    pub low_signal_anchor: i32,
    pub non_content_hint: i32,
    pub section_path: i32,
    pub index_path: i32,
    pub article_id_path: i32,
    /// Negative candidates stop being admitted once this many slots are
    /// filled, or half of the requested maximum if that is larger.
    pub admission_floor: usize,
}

impl Default for LinkWeights {
    fn default() -> Self {
        Self {
            same_site: 2,
            deep_path: 1,
            deep_path_min_segments: 2,
            content_path: 2,
            descriptive_anchor: 2,
            descriptive_anchor_min_words: 4,
            descriptive_anchor_max_words: 20,
            bare_anchor: -2,
            low_signal_anchor: -4,
            non_content_hint: -3,
            section_path: -4,
            index_path: -2,
            article_id_path: 3,
            admission_floor: 2,
        }
    }
}

/// Link scanning setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default)]
    pub vocabulary: LinkVocabulary,
    #[serde(default)]
    pub weights: LinkWeights,
    /// Run the noise pruner over the container before collecting anchors.
    #[serde(default = "default_true")]
    pub prune_container: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            vocabulary: LinkVocabulary::default(),
            weights: LinkWeights::default(),
            prune_container: true,
        }
    }
}

/// Complete extractor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub noise: NoiseVocabulary,
    #[serde(default)]
    pub container: ContainerRules,
    #[serde(default)]
    pub paragraphs: ParagraphRules,
    #[serde(default)]
    pub thresholds: LadderThresholds,
    #[serde(default)]
    pub links: LinkConfig,
}

impl ExtractorConfig {
    /// Parses a JSON document; omitted fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
