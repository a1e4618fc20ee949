// src/index/mod.rs
// =============================================================================
// This module owns everything about turning page content into index entries.
//
// Submodules:
// - keywords: Tokenization, stop-word filtering, and field weighting
// - inverted: The term -> URL-set inverted index itself
//
// The index is a plain owned value: callers create as many independent
// indexes as they like and pass them into search explicitly. There is no
// global singleton, and mutation is single-writer by convention.
// =============================================================================

mod inverted;
mod keywords;

pub use inverted::SearchIndex;
pub use keywords::{extract_keywords, weighted_keywords};
