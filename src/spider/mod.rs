// src/spider/mod.rs
// =============================================================================
// This module turns seed URLs into structured page records.
//
// Submodules:
// - fetch: Retrieves raw HTML for a URL over HTTP
// - extract: Parses HTML into a PageRecord (title, headings, paragraphs, links)
// - crawl: Runs fetch + extract over many URLs concurrently
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// - async: Asynchronous code that can run concurrently
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod crawl;
mod extract;
mod fetch;

// Re-export public items from submodules
// This lets users write `spider::crawl_pages()` instead of
// `spider::crawl::crawl_pages()`
pub use crawl::{analyze_page, crawl_pages, CrawlOutcome, DEFAULT_CONCURRENCY};
pub use extract::{extract_page, ExtractError, Heading, Link, PageRecord};
pub use fetch::{fetch_page, FetchError};
