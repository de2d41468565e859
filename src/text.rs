//! Text normalization shared by every extraction stage.

use scraper::ElementRef;

/// UTF-8 text that was decoded as Windows-1252 somewhere upstream. Longest
/// sequences first so the bare `Â`/`â€` prefixes only catch leftovers.
const MOJIBAKE: &[(&str, &str)] = &[
    ("â€™", "'"),
    ("â€˜", "'"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("â€“", "-"),
    ("â€”", "-"),
    ("â€¦", "..."),
    ("â€¢", " "),
    ("â€", "\""),
    ("Â", " "),
];

pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes extracted text: repairs encoding artifacts, folds typographic
/// punctuation to ASCII and collapses whitespace.
pub fn clean_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut repaired = input.to_string();
    for (artifact, replacement) in MOJIBAKE {
        if repaired.contains(artifact) {
            repaired = repaired.replace(artifact, replacement);
        }
    }

    let mut folded = String::with_capacity(repaired.len());
    for ch in repaired.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => folded.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' => folded.push('-'),
            '\u{2026}' => folded.push_str("..."),
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => folded.push(' '),
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{FFFD}' => {}
            _ => folded.push(ch),
        }
    }

    normalize_whitespace(&folded)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn element_word_count(element: &ElementRef<'_>) -> usize {
    element
        .text()
        .map(|chunk| chunk.split_whitespace().count())
        .sum()
}

pub fn element_text(element: &ElementRef<'_>) -> String {
    let pieces = element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>();
    pieces.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn repairs_mojibake_and_typography() {
        assert_eq!(
            clean_text("Itâ€™s\u{00A0}a â€œtestâ€\u{9d} â€“ really"),
            "It's a \"test\" - really"
        );
        assert_eq!(clean_text("“Quoted” — and ‘single’…"), "\"Quoted\" - and 'single'...");
        assert_eq!(clean_text("zero\u{200B}width\u{FEFF}"), "zerowidth");
        assert_eq!(clean_text("price:Â 10"), "price: 10");
    }

    #[test]
    fn counts_words_across_inline_markup() {
        let doc = Html::parse_fragment("<p>one <b>two</b>three <i> four </i></p>");
        let root = doc.root_element();
        assert_eq!(element_word_count(&root), 4);
        assert_eq!(element_text(&root), "one two three four");
        assert_eq!(word_count(" one  two "), 2);
    }
}
