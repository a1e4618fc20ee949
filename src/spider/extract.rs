// src/spider/extract.rs
// =============================================================================
// This module parses raw HTML into a structured PageRecord.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative hrefs against the page URL.
//
// Extraction is deliberately forgiving: malformed markup produces a partial
// record rather than an error. Only a completely empty document is rejected.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Sentinel title for pages without a <title> element
pub const MISSING_TITLE: &str = "No title found";

/// Sentinel anchor text for links without any visible text
pub const MISSING_ANCHOR_TEXT: &str = "[No Text]";

// Returned only when there is nothing to parse at all
#[derive(Debug, Error)]
#[error("could not extract content: {0}")]
pub struct ExtractError(pub String);

/// A heading element with its level (1-6) preserved for weighting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// A link with its href resolved to an absolute URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

// Everything we keep from one fetched page
//
// A PageRecord is produced once per successful fetch and never mutated;
// re-crawling a URL builds a fresh record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// The absolute URL this record was built from
    pub url: String,
    /// First <title> text, or the sentinel if the page has none
    pub title: String,
    /// All h1-h6 elements in document order
    pub headings: Vec<Heading>,
    /// All <p> elements in document order, trimmed but not filtered
    pub paragraphs: Vec<String>,
    /// All anchors with a resolvable href, in document order
    pub links: Vec<Link>,
}

// Parses HTML into a PageRecord
//
// Parameters:
//   url: the page's own URL (used to resolve relative links)
//   html: the raw HTML content
//
// Returns: Ok(PageRecord) for anything html5ever can make sense of, which
// is nearly everything. Only an empty body is an error.
pub fn extract_page(url: &str, html: &str) -> Result<PageRecord, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError(format!("empty document at {}", url)));
    }

    let document = Html::parse_document(html);

    Ok(PageRecord {
        url: url.to_string(),
        title: extract_title(&document),
        headings: extract_headings(&document),
        paragraphs: extract_paragraphs(&document),
        links: extract_links(&document, url),
    })
}

// Returns the first <title> element's trimmed text, or the sentinel
fn extract_title(document: &Html) -> String {
    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selector is a constant and known
    // to be valid.
    let selector = Selector::parse("title").unwrap();

    document
        .select(&selector)
        .next()
        .map(|element| element_text(element))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| MISSING_TITLE.to_string())
}

// Collects h1-h6 in document order, keeping the level for weighting
fn extract_headings(document: &Html) -> Vec<Heading> {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();

    document
        .select(&selector)
        .map(|element| {
            // The selector only matches h1-h6, so the tag name is always
            // 'h' followed by a single digit
            let level = element
                .value()
                .name()
                .trim_start_matches('h')
                .parse()
                .unwrap_or(6);

            Heading {
                level,
                text: element_text(element),
            }
        })
        .collect()
}

// Collects all <p> elements, trimmed
//
// Empty paragraphs are kept on purpose: the record mirrors document
// structure, and the keyword extractor ignores empty text anyway.
fn extract_paragraphs(document: &Html) -> Vec<String> {
    let selector = Selector::parse("p").unwrap();

    document
        .select(&selector)
        .map(|element| element_text(element))
        .collect()
}

// Collects all anchors with a resolvable href
//
// Relative hrefs are resolved against the page URL. If the page URL itself
// doesn't parse we can't resolve anything, so we degrade to no links rather
// than failing the whole extraction.
fn extract_links(document: &Html, page_url: &str) -> Vec<Link> {
    let selector = Selector::parse("a[href]").unwrap();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            log::warn!("page URL does not parse, skipping links: {}", page_url);
            return Vec::new();
        }
    };

    let mut links = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // Unresolvable hrefs are silently dropped (not an error)
            if let Some(absolute) = resolve_href(&base, href) {
                let text = element_text(element);

                links.push(Link {
                    href: absolute,
                    text: if text.is_empty() {
                        MISSING_ANCHOR_TEXT.to_string()
                    } else {
                        text
                    },
                });
            }
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute URL
//
// If it's already absolute (has a scheme), Url::parse works directly.
// If it's relative, parsing fails and we join it with the base instead,
// the same way a browser would.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => base.join(href).ok().map(|url| url.to_string()),
    }
}

// Concatenates an element's text nodes and trims the result
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://example.com/page";

    #[test]
    fn test_title_extracted_and_trimmed() {
        let html = "<html><head><title>  Rust programming  </title></head></html>";
        let record = extract_page(PAGE_URL, html).unwrap();
        assert_eq!(record.title, "Rust programming");
    }

    #[test]
    fn test_missing_title_uses_sentinel() {
        let html = "<html><body><p>no title here</p></body></html>";
        let record = extract_page(PAGE_URL, html).unwrap();
        assert_eq!(record.title, MISSING_TITLE);
    }

    #[test]
    fn test_headings_keep_document_order_and_level() {
        let html = "<h2>Second</h2><h1>First</h1><h3>Third</h3>";
        let record = extract_page(PAGE_URL, html).unwrap();

        let levels: Vec<u8> = record.headings.iter().map(|h| h.level).collect();
        let texts: Vec<&str> = record.headings.iter().map(|h| h.text.as_str()).collect();

        assert_eq!(levels, vec![2, 1, 3]);
        assert_eq!(texts, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn test_empty_paragraphs_are_kept() {
        let html = "<p>first</p><p>   </p><p>last</p>";
        let record = extract_page(PAGE_URL, html).unwrap();
        assert_eq!(record.paragraphs, vec!["first", "", "last"]);
    }

    #[test]
    fn test_relative_link_resolved_against_page() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let record = extract_page(PAGE_URL, html).unwrap();
        assert_eq!(record.links.len(), 1);
        assert_eq!(record.links[0].href, "https://example.com/docs");
        assert_eq!(record.links[0].text, "Docs");
    }

    #[test]
    fn test_empty_anchor_text_uses_sentinel() {
        let html = r#"<a href="https://other.com"></a>"#;
        let record = extract_page(PAGE_URL, html).unwrap();
        assert_eq!(record.links[0].text, MISSING_ANCHOR_TEXT);
    }

    #[test]
    fn test_unparseable_page_url_degrades_to_no_links() {
        let html = r#"<title>Still fine</title><a href="/docs">Docs</a>"#;
        let record = extract_page("not a url", html).unwrap();
        assert_eq!(record.title, "Still fine");
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let result = extract_page(PAGE_URL, "   ");
        assert!(result.is_err());
    }
}
