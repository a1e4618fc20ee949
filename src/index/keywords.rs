// src/index/keywords.rs
// =============================================================================
// This module turns raw text into ranked keywords.
//
// Pipeline:
// 1. Lowercase the text
// 2. Strip everything except alphanumerics, whitespace, and hyphens
// 3. Split on whitespace
// 4. Drop stop words and tokens of length <= 2
// 5. Count frequencies, then sort descending (stable, so ties keep
//    first-occurrence order)
//
// For indexing a whole page we don't tokenize the fields separately.
// Instead the page is flattened into one pseudo-document where important
// fields are repeated: the title 8 times, an h1 six times, and so on down
// to plain paragraphs and anchor text once each. Repetition stands in for
// importance-by-location; it is explicitly not tf-idf - there is no
// corpus-wide normalization and field identity is lost after flattening.
// =============================================================================

use std::collections::{HashMap, HashSet};

use crate::spider::PageRecord;

/// How many times the title is repeated in the pseudo-document
const TITLE_WEIGHT: usize = 8;

/// Tokens this short are never worth indexing
const MIN_TOKEN_LEN: usize = 3;

lazy_static::lazy_static! {
    // Common English function words that carry no search value.
    // Exact-match, case-insensitive (input is lowercased first), no stemming.
    static ref STOP_WORDS: HashSet<&'static str> = {
        [
            "the", "and", "is", "a", "about", "this", "of", "for", "to", "in",
            "on", "with", "that", "by", "it", "as", "you", "i", "me", "my",
            "we", "our", "ours", "us", "he", "him", "his", "she", "her",
            "hers", "they", "them", "their", "theirs", "at", "from", "was",
            "were", "be", "been", "are", "but", "not", "or", "so", "if",
            "then", "than", "because", "what", "which", "who", "whom",
            "where", "when", "how", "why", "can", "much", "there", "could",
        ]
        .iter()
        .copied()
        .collect()
    };
}

// Extracts keywords from free text, most frequent first
//
// Ties are broken by first-occurrence order: sort_by is a stable sort and
// the working list is built in occurrence order, so equal counts never
// reorder.
//
// Example:
//   "The Quick Brown Fox Jumps" -> ["quick", "brown", "fox", "jumps"]
//   ("the" is a stop word, everything else appears once)
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    // Strip punctuation but keep hyphens, so "well-known" stays one token
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut in_order: Vec<&str> = Vec::new();

    for word in cleaned.split_whitespace() {
        // Character count, not byte length: a two-letter accented token is
        // still too short even though it is four bytes
        if word.chars().count() < MIN_TOKEN_LEN || STOP_WORDS.contains(word) {
            continue;
        }

        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            in_order.push(word);
        }
        *count += 1;
    }

    let mut keywords = in_order;
    keywords.sort_by(|a, b| counts[*b].cmp(&counts[*a]));

    keywords.into_iter().map(String::from).collect()
}

// Extracts keywords from a page with per-field importance weighting
//
// Used when indexing a page; plain queries go through extract_keywords.
pub fn weighted_keywords(record: &PageRecord) -> Vec<String> {
    extract_keywords(&weighted_document(record))
}

// Flattens a PageRecord into a pseudo-document with fields repeated by
// importance: title x8, headings by level, paragraphs x1, anchor text x1
// appended last
fn weighted_document(record: &PageRecord) -> String {
    let mut doc = String::new();

    for _ in 0..TITLE_WEIGHT {
        push_field(&mut doc, &record.title);
    }

    for heading in &record.headings {
        for _ in 0..heading_weight(heading.level) {
            push_field(&mut doc, &heading.text);
        }
    }

    for paragraph in &record.paragraphs {
        push_field(&mut doc, paragraph);
    }

    for link in &record.links {
        push_field(&mut doc, &link.text);
    }

    doc
}

// Repetition count per heading level: top-level headings matter most
fn heading_weight(level: u8) -> usize {
    match level {
        1 => 6,
        2 => 4,
        3 => 2,
        _ => 1,
    }
}

fn push_field(doc: &mut String, text: &str) {
    if !text.is_empty() {
        doc.push_str(text);
        doc.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spider::{Heading, Link};

    fn record(title: &str, headings: Vec<Heading>, paragraphs: Vec<&str>) -> PageRecord {
        PageRecord {
            url: "https://example.com/".to_string(),
            title: title.to_string(),
            headings,
            paragraphs: paragraphs.into_iter().map(String::from).collect(),
            links: Vec::new(),
        }
    }

    #[test]
    fn test_stop_words_and_case_are_stripped() {
        let keywords = extract_keywords("The Quick Brown Fox Jumps");
        assert_eq!(keywords, vec!["quick", "brown", "fox", "jumps"]);
    }

    #[test]
    fn test_sorted_by_frequency_descending() {
        let keywords = extract_keywords("rust is great rust is fast rust");
        assert_eq!(keywords[0], "rust");
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let keywords = extract_keywords("zebra apple zebra apple banana");
        assert_eq!(keywords, vec!["zebra", "apple", "banana"]);
    }

    #[test]
    fn test_punctuation_stripped_but_hyphen_kept() {
        let keywords = extract_keywords("Hello, World! A well-known greeting.");
        assert_eq!(keywords, vec!["hello", "world", "well-known", "greeting"]);
    }

    #[test]
    fn test_short_tokens_dropped() {
        assert!(extract_keywords("go ok me to").is_empty());
    }

    #[test]
    fn test_length_filter_counts_characters_not_bytes() {
        // "éé" is two characters (four bytes in UTF-8) and must be dropped
        let keywords = extract_keywords("éé ééé");
        assert_eq!(keywords, vec!["ééé"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_title_outweighs_paragraph() {
        // "rust" appears once in the title (x8) and "cooking" once in a
        // paragraph (x1), so rust must sort first
        let record = record("rust", Vec::new(), vec!["cooking"]);
        let keywords = weighted_keywords(&record);
        assert_eq!(keywords, vec!["rust", "cooking"]);
    }

    #[test]
    fn test_h1_outweighs_h3() {
        let record = record(
            "",
            vec![
                Heading {
                    level: 3,
                    text: "beta".to_string(),
                },
                Heading {
                    level: 1,
                    text: "alpha".to_string(),
                },
            ],
            Vec::new(),
        );
        let keywords = weighted_keywords(&record);
        assert_eq!(keywords, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_anchor_text_is_indexed() {
        let mut record = record("title words", Vec::new(), Vec::new());
        record.links.push(Link {
            href: "https://other.com/".to_string(),
            text: "documentation".to_string(),
        });

        let keywords = weighted_keywords(&record);
        assert!(keywords.contains(&"documentation".to_string()));
    }
}
