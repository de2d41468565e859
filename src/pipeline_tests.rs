use std::collections::HashSet;

use pretty_assertions::assert_eq;

use crate::config::ExtractorConfig;
use crate::container::{ContainerOrigin, ContainerSelector};
use crate::document::{Document, ParsedTree};
use crate::error::ExtractionError;
use crate::models::Strategy;
use crate::prune::NoisePruner;
use crate::readability::tests::CannedEngine;
use crate::reader::Extractor;
use crate::summarize::summarize;

fn words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{prefix}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn paragraphs(prefix: &str, count: usize, words_each: usize) -> String {
    (0..count)
        .map(|i| format!("<p>{}</p>", words(&format!("{prefix}{i}w"), words_each)))
        .collect()
}

fn plain_extractor() -> Extractor {
    Extractor::new(ExtractorConfig::default())
        .unwrap()
        .without_readability()
}

#[test]
fn article_wins_over_a_larger_navigation_block() {
    let html = format!(
        r#"<html><body>
             <nav class="nav-menu">{}</nav>
             <article>{}</article>
           </body></html>"#,
        words("menu", 300),
        paragraphs("a", 20, 10)
    );

    let result = plain_extractor().extract(&html, "https://example.com/").unwrap();
    assert_eq!(result.strategy_used, Strategy::Primary);
    assert_eq!(result.word_count, 200);
    assert!(!result.text.contains("menu0"));
}

#[test]
fn hinted_container_wins_over_a_noisy_div() {
    let html = format!(
        r#"<html><body>
             <div class="nav-menu">{}</div>
             <div class="story-body">{}</div>
           </body></html>"#,
        paragraphs("m", 30, 10),
        paragraphs("s", 20, 10)
    );

    let document = ParsedTree::parse_document(&html);
    let candidate = ContainerSelector::default().select(&document);
    assert_eq!(candidate.origin, ContainerOrigin::Hinted);
    assert_eq!(candidate.word_count, 200);

    let result = plain_extractor().extract(&html, "https://example.com/").unwrap();
    assert_eq!(result.word_count, 200);
}

#[test]
fn readability_replaces_a_thin_primary_result() {
    let html = format!("<html><body><div><p>{}</p></div></body></html>", words("t", 10));
    let canned = format!("<div>{}</div>", paragraphs("r", 10, 15));

    let result = Extractor::new(ExtractorConfig::default())
        .unwrap()
        .with_main_content_extractor(CannedEngine(Some(canned)))
        .extract(&html, "https://example.com/thin")
        .unwrap();

    assert_eq!(result.strategy_used, Strategy::Readability);
    assert_eq!(result.word_count, 150);
}

#[test]
fn non_html_payload_is_rejected() {
    let document = Document::new("%PDF-1.7 ...", "https://example.com/report.pdf")
        .with_content_type("application/pdf");

    let err = plain_extractor().extract_document(&document).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::UnsupportedContent { ref content_type }
            if content_type == "application/pdf"
    ));
}

#[test]
fn summarize_scenario() {
    assert_eq!(summarize("one two three four five", 3), "one two three");
}

fn link_page() -> String {
    r##"<html><body><div>
         <a href="/news/articles/c1">Council approves new housing plan for the city</a>
         <a href="/news/articles/c1#comments">Comments</a>
         <a href="/news/live/election">Election live updates as results arrive</a>
         <a href="https://other.example.org/story/2024/x">Partner site covers the same story</a>
         <a href="/news/topics/climate">Climate</a>
         <a href="/sport">Sport</a>
         <a href="/">Home</a>
         <a href="#top">Back to top</a>
         <a href="mailto:desk@example.com">Email the desk</a>
         <a href="/news/articles/c2">Rail strike called off after late talks</a>
       </div></body></html>"##
        .to_string()
}

#[test]
fn link_ranking_is_deterministic_and_bounded() {
    let extractor = plain_extractor();
    let html = link_page();
    let base = "https://www.example.com/news";

    for max in 1..=8 {
        let first = extractor.score_links(&html, base, max);
        let second = extractor.score_links(&html, base, max);
        assert_eq!(first, second);
        assert!(first.len() <= max);

        let unique = first
            .iter()
            .map(|link| link.absolute_url.as_str())
            .collect::<HashSet<_>>();
        assert_eq!(unique.len(), first.len());
        assert!(first.iter().all(|link| !link.absolute_url.contains('#')));
    }

    let top = extractor.score_links(&html, base, 2);
    assert_eq!(
        top.iter().map(|l| l.absolute_url.as_str()).collect::<Vec<_>>(),
        vec![
            "https://www.example.com/news/articles/c1",
            "https://www.example.com/news/articles/c2",
        ]
    );
}

#[test]
fn utility_only_links_fill_at_most_the_minimum_slots() {
    let html = r#"<html><body><div>
        <a href="/login">Login</a>
        <a href="/account">Account</a>
        <a href="/account/settings">Settings</a>
        <a href="/register">Register</a>
        <a href="/signin?next=/">Sign in</a>
      </div></body></html>"#;

    let links = plain_extractor().score_links(html, "https://www.example.com/", 3);
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|link| link.score < 0));
}

#[test]
fn pruning_twice_changes_nothing() {
    let html = format!(
        r#"<html><body>
             <header>Site</header>
             <div class="cookie-banner">Accept all</div>
             <main><div id="share-tools">Share</div>{}</main>
             <footer>Legal</footer>
           </body></html>"#,
        paragraphs("b", 3, 9)
    );
    let pruner = NoisePruner::default();
    let mut tree = ParsedTree::parse_document(&html);

    assert!(pruner.prune(&mut tree) > 0);
    let once = tree.to_html();
    assert_eq!(pruner.prune(&mut tree), 0);
    assert_eq!(tree.to_html(), once);
}

#[test]
fn equal_siblings_resolve_to_the_first() {
    let html = format!(
        r#"<html><body>
             <div id="first" class="content">{}</div>
             <div id="second" class="content">{}</div>
           </body></html>"#,
        words("x", 30),
        words("y", 30)
    );
    let document = ParsedTree::parse_document(&html);
    let candidate = ContainerSelector::default().select(&document);

    assert_eq!(candidate.element.value().attr("id"), Some("first"));
    assert_eq!(candidate.word_count, 30);
}
