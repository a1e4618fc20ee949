// src/export/mod.rs
// =============================================================================
// This module exports the indexed sites to a CSV file.
//
// Page records are transient (the index keeps only terms, never whole
// pages), so the export re-crawls every indexed URL to get fresh structure
// counts. URLs that fail to re-crawl are skipped with a warning - the rest
// of the export still goes through.
//
// Columns: URL, title, heading/paragraph/link counts, and the page's top
// five index terms.
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::index::SearchIndex;
use crate::spider::{crawl_pages, PageRecord};

/// Default output file name
pub const EXPORT_FILE: &str = "search_engine_data.csv";

/// How many keywords to show per page
const TOP_KEYWORDS: usize = 5;

const CSV_HEADER: &str =
    "URL,Title,Number of Headings,Number of Paragraphs,Number of Links,Top Keywords\n";

// Re-crawls the indexed URLs and writes one CSV row per page
//
// Returns the number of rows written (not counting the header).
pub async fn export_csv(
    index: &SearchIndex,
    urls: &[String],
    path: &Path,
    concurrency: usize,
) -> Result<usize> {
    let outcomes = crawl_pages(urls, concurrency).await;

    let mut csv = String::from(CSV_HEADER);
    let mut rows = 0;

    for outcome in outcomes {
        let Some(record) = outcome.record else {
            log::warn!("skipping {} in export: re-crawl failed", outcome.url);
            continue;
        };

        let keywords = index
            .terms_for_url(&outcome.url)
            .into_iter()
            .take(TOP_KEYWORDS)
            .collect::<Vec<_>>()
            .join(" | ");

        csv.push_str(&csv_row(&outcome.url, &record, &keywords));
        rows += 1;
    }

    fs::write(path, csv).with_context(|| format!("could not write {}", path.display()))?;
    Ok(rows)
}

// Builds one row of the export
//
// Both free-text columns go through csv_field: titles obviously, but URLs
// too - commas are legal in query strings and would shift the columns.
fn csv_row(url: &str, record: &PageRecord, keywords: &str) -> String {
    format!(
        "{},{},{},{},{},{}\n",
        csv_field(url),
        csv_field(&record.title),
        record.headings.len(),
        record.paragraphs.len(),
        record.links.len(),
        keywords
    )
}

// Keeps a free-text field from breaking the row apart
//
// The format is plain comma-separated with no quoting, so embedded commas
// become spaces (same policy the keywords column gets via " | ").
fn csv_field(text: &str) -> String {
    text.replace(',', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commas_replaced_in_fields() {
        assert_eq!(csv_field("Cooking, pasta, and more"), "Cooking  pasta  and more");
        assert_eq!(csv_field("no commas"), "no commas");
    }

    #[test]
    fn test_url_with_comma_cannot_shift_columns() {
        let record = PageRecord {
            url: "https://example.com/?ids=1,2".to_string(),
            title: "One, two".to_string(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            links: Vec::new(),
        };

        let row = csv_row("https://example.com/?ids=1,2", &record, "");

        // Exactly six columns, same as the header
        assert_eq!(row.trim_end().split(',').count(), 6);
        assert!(row.starts_with("https://example.com/?ids=1 2,"));
    }

    #[tokio::test]
    async fn test_unreachable_urls_still_produce_a_file() {
        let index = SearchIndex::new();
        let urls = vec!["http://127.0.0.1:1/".to_string()];
        let dir = std::env::temp_dir();
        let path = dir.join("webseek_export_test.csv");

        let rows = export_csv(&index, &urls, &path, 2).await.unwrap();

        assert_eq!(rows, 0);
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, CSV_HEADER);
        let _ = fs::remove_file(&path);
    }
}
