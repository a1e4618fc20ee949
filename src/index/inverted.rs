// src/index/inverted.rs
// =============================================================================
// The inverted index: a map from term to the set of URLs containing it.
//
// Invariant: a term key exists if and only if its URL set is non-empty.
// remove() enforces this by dropping any entry whose set it just emptied,
// so a query can never surface a URL that was removed.
//
// insert() always purges prior postings for the URL first. Re-indexing a
// page after its content changed must never leave stale terms behind.
//
// Rust concepts:
// - HashMap + HashSet: O(1) postings lookup, O(1) membership
// - Ownership: the index is a plain value the caller owns and passes around
// =============================================================================

use std::collections::{HashMap, HashSet};

use crate::spider::PageRecord;

use super::keywords::weighted_keywords;

/// Term -> set of URLs whose content contains that term
#[derive(Debug, Default)]
pub struct SearchIndex {
    terms: HashMap<String, HashSet<String>>,
}

impl SearchIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    // Indexes a page under every keyword extracted from its weighted fields
    //
    // Prior postings for the URL are removed first, so calling insert again
    // with new content fully supersedes the old entries.
    pub fn insert(&mut self, url: &str, record: &PageRecord) {
        self.remove(url);

        for term in weighted_keywords(record) {
            self.terms
                .entry(term)
                .or_insert_with(HashSet::new)
                .insert(url.to_string());
        }
    }

    // Removes a URL from every posting set it appears in
    //
    // The scan is exhaustive on purpose: a single missed stale posting
    // would let search return a removed URL. Terms whose set becomes empty
    // are dropped entirely (no dangling empty keys).
    pub fn remove(&mut self, url: &str) {
        for urls in self.terms.values_mut() {
            urls.remove(url);
        }
        self.terms.retain(|_, urls| !urls.is_empty());
    }

    /// Replaces a page's entries with ones built from new content
    ///
    /// Equivalent to remove-then-insert, exposed as a single call.
    pub fn replace(&mut self, url: &str, record: &PageRecord) {
        // insert() already purges old postings
        self.insert(url, record);
    }

    /// Returns the posting set for a term, or None if the term is unknown
    pub fn lookup(&self, term: &str) -> Option<&HashSet<String>> {
        self.terms.get(term)
    }

    // Returns every term that posts the given URL, sorted
    //
    // Used by the CSV export to show a page's top keywords.
    pub fn terms_for_url(&self, url: &str) -> Vec<&str> {
        let mut terms: Vec<&str> = self
            .terms
            .iter()
            .filter(|(_, urls)| urls.contains(url))
            .map(|(term, _)| term.as_str())
            .collect();
        terms.sort();
        terms
    }

    /// Number of distinct terms currently indexed
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
