// src/search/mod.rs
// =============================================================================
// This module answers free-text queries against a SearchIndex.
//
// How a query runs:
// 1. Extract keywords from the query text (same pipeline as indexing, but
//    without field weighting)
// 2. Union the posting sets of every query term into a candidate list
//    (OR semantics: matching one term is enough to qualify)
// 3. Score each candidate with a fixed weight per matching term, plus a
//    bonus when the URL itself contains the query text
// 4. Stable-sort descending by score and return the URLs
//
// "No results" and "query was all stop words" are both empty lists, never
// errors. Scores stay internal to this module.
// =============================================================================

use std::collections::HashSet;

use crate::index::{extract_keywords, SearchIndex};

/// Score added for each query term whose posting set contains the URL
const TERM_MATCH_WEIGHT: u32 = 10;

/// Bonus when the URL itself contains the whole query (case-insensitive)
///
/// A cheap proxy for title/URL affinity: pages whose address mentions the
/// query are usually about it.
const URL_MATCH_BONUS: u32 = 20;

// Searches the index and returns URLs, most relevant first
//
// Parameters:
//   index: the inverted index to query (borrowed, never mutated)
//   query: free-form query text
pub fn search(index: &SearchIndex, query: &str) -> Vec<String> {
    let terms = extract_keywords(query);
    if terms.is_empty() {
        // Empty query, or nothing survived stop-word filtering
        return Vec::new();
    }

    let candidates = collect_candidates(index, &terms);

    let query_lower = query.to_lowercase();
    let mut scored: Vec<(String, u32)> = candidates
        .into_iter()
        .map(|url| {
            let score = score_page(index, &terms, &query_lower, &url);
            (url, score)
        })
        .collect();

    // Stable sort: equal scores keep candidate order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored.into_iter().map(|(url, _)| url).collect()
}

// Unions the posting sets of all query terms into a deduplicated list
//
// Each term's postings are visited in sorted order so the candidate list
// (and therefore tie-breaking) is deterministic.
fn collect_candidates(index: &SearchIndex, terms: &[String]) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for term in terms {
        if let Some(urls) = index.lookup(term) {
            let mut urls: Vec<&String> = urls.iter().collect();
            urls.sort();

            for url in urls {
                if seen.insert(url.as_str()) {
                    candidates.push(url.clone());
                }
            }
        }
        // A term with no postings simply contributes nothing
    }

    candidates
}

// Scores one candidate URL against the query terms
//
// Kept separate from tokenization and candidate collection on purpose, so
// the policy can be swapped for a real tf-idf scheme later without touching
// the rest of the query path.
fn score_page(index: &SearchIndex, terms: &[String], query_lower: &str, url: &str) -> u32 {
    let mut score = 0;

    for term in terms {
        let matched = index
            .lookup(term)
            .map_or(false, |urls| urls.contains(url));
        if matched {
            score += TERM_MATCH_WEIGHT;
        }
    }

    if url.to_lowercase().contains(query_lower) {
        score += URL_MATCH_BONUS;
    }

    score
}
