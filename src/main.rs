// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to a one-shot subcommand handler (crawl, search), or
// 3. Drop into the interactive shell: add/remove/view indexed sites,
//    search, and export to CSV
// 4. Exit with proper code (0 = success, 1 = failures found, 2 = error)
//
// The shell owns the application state: one SearchIndex plus the list of
// URLs under management. Removing a URL purges it from both.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod export; // src/export/ - CSV export of indexed sites
mod index; // src/index/ - keyword extraction and the inverted index
mod search; // src/search/ - query execution and ranking
mod spider; // src/spider/ - fetching, extraction, crawling

use std::io::{self, Write};
use std::path::Path;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method

use cli::{Cli, Commands};
use export::{export_csv, EXPORT_FILE};
use index::SearchIndex;
use spider::{crawl_pages, CrawlOutcome};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // RUST_LOG=debug surfaces per-URL fetch/extract traces
    env_logger::init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = success
//   Ok(1) = crawl failures / nothing indexed
//   Err = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Crawl { urls, json }) => handle_crawl(&urls, json, cli.concurrency).await,
        Some(Commands::Search { query, seeds, json }) => {
            handle_search(&query, &seeds, json, cli.concurrency).await
        }
        None => run_shell(cli.concurrency).await,
    }
}

// Handles the 'crawl' subcommand: crawl the URLs and report each outcome
async fn handle_crawl(urls: &[String], json: bool, concurrency: usize) -> Result<i32> {
    println!("🔍 Crawling {} URL(s)...\n", urls.len());

    let outcomes = crawl_pages(urls, concurrency).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print_crawl_table(&outcomes);
    }

    let failed = outcomes.iter().filter(|o| !o.success).count();
    if failed > 0 {
        Ok(1) // Exit code 1 = some URLs could not be crawled
    } else {
        Ok(0)
    }
}

// Handles the 'search' subcommand: build an index from the seeds, query it
async fn handle_search(
    query: &str,
    seeds: &[String],
    json: bool,
    concurrency: usize,
) -> Result<i32> {
    println!("🔍 Crawling {} seed URL(s)...", seeds.len());

    let outcomes = crawl_pages(seeds, concurrency).await;
    let mut idx = SearchIndex::new();
    let mut indexed = 0;

    for outcome in &outcomes {
        match &outcome.record {
            Some(record) => {
                idx.insert(&outcome.url, record);
                indexed += 1;
            }
            None => {
                eprintln!(
                    "⚠️  Skipping {}: {}",
                    outcome.url,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    if indexed == 0 {
        println!("❌ No seed URL could be indexed");
        return Ok(1);
    }

    println!("📄 Indexed {} of {} seed(s)\n", indexed, seeds.len());

    let results = search::search(&idx, query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results found.");
    } else {
        print_result_list(&results);
    }

    Ok(0)
}

// =============================================================================
// Interactive shell
// =============================================================================

// Runs the menu loop until the user exits (or stdin closes)
async fn run_shell(concurrency: usize) -> Result<i32> {
    println!("Welcome to the Search Engine!");

    // The shell's state: the index plus the URLs under management.
    // These two must stay consistent - removal purges both.
    let mut idx = SearchIndex::new();
    let mut indexed_urls: Vec<String> = Vec::new();

    loop {
        print_menu();

        let Some(choice) = prompt("What would you like to do? (1-6): ")? else {
            break; // stdin closed
        };

        match choice.as_str() {
            "1" => add_websites(&mut idx, &mut indexed_urls, concurrency).await?,
            "2" => run_query(&idx)?,
            "3" => remove_website(&mut idx, &mut indexed_urls)?,
            "4" => view_indexed(&indexed_urls),
            "5" => export_data(&idx, &indexed_urls, concurrency).await?,
            "6" => {
                println!("Thanks for using the Search Engine. Goodbye!");
                break;
            }
            _ => println!("Please enter a number between 1 and 6"),
        }
    }

    Ok(0)
}

fn print_menu() {
    println!("\n=== Search Engine Menu ===");
    println!("1. Add website(s)");
    println!("2. Search");
    println!("3. Remove a website");
    println!("4. View indexed sites");
    println!("5. Export data to CSV");
    println!("6. Exit");
}

// Menu option 1: crawl and index one or more websites
async fn add_websites(
    idx: &mut SearchIndex,
    indexed_urls: &mut Vec<String>,
    concurrency: usize,
) -> Result<()> {
    let Some(input) = prompt("Enter website URL(s) (separate multiple URLs with commas): ")?
    else {
        return Ok(());
    };

    // Keep only URLs with an explicit http(s) scheme; warn about the rest
    let mut urls = Vec::new();
    for url in input.split(',').map(str::trim) {
        if url.is_empty() {
            continue;
        }
        if !url.starts_with("http") {
            println!("Invalid URL ({}): Please include http:// or https://", url);
            continue;
        }
        urls.push(url.to_string());
    }

    if urls.is_empty() {
        println!("No valid URLs to add.");
        return Ok(());
    }

    println!("Adding websites to index...");
    let outcomes = crawl_pages(&urls, concurrency).await;

    for outcome in &outcomes {
        match &outcome.record {
            Some(record) => {
                idx.insert(&outcome.url, record);
                if !indexed_urls.contains(&outcome.url) {
                    indexed_urls.push(outcome.url.clone());
                }
                println!("✅ Indexed: {}", outcome.url);
            }
            None => {
                println!(
                    "❌ Failed: {} ({})",
                    outcome.url,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    Ok(())
}

// Menu option 2: run a free-text query against the index
fn run_query(idx: &SearchIndex) -> Result<()> {
    let Some(query) = prompt("Enter search terms: ")? else {
        return Ok(());
    };

    let results = search::search(idx, &query);

    if results.is_empty() {
        println!("No results found.");
    } else {
        println!("\n🔍 Results (most relevant first):");
        print_result_list(&results);
    }

    Ok(())
}

// Menu option 3: remove a site from the index and the managed list
fn remove_website(idx: &mut SearchIndex, indexed_urls: &mut Vec<String>) -> Result<()> {
    let Some(url) = prompt("Enter the URL to remove: ")? else {
        return Ok(());
    };

    if indexed_urls.contains(&url) {
        idx.remove(&url);
        indexed_urls.retain(|u| u != &url);
        println!("✅ Removed: {}", url);
    } else {
        println!("That URL is not indexed.");
    }

    Ok(())
}

// Menu option 4: list the sites under management
fn view_indexed(indexed_urls: &[String]) {
    if indexed_urls.is_empty() {
        println!("No sites have been indexed yet.");
        return;
    }

    println!("\n📄 Indexed sites:");
    for (i, url) in indexed_urls.iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
}

// Menu option 5: export the indexed sites to a CSV file
async fn export_data(
    idx: &SearchIndex,
    indexed_urls: &[String],
    concurrency: usize,
) -> Result<()> {
    if indexed_urls.is_empty() {
        println!("No sites have been indexed yet.");
        return Ok(());
    }

    println!("Re-crawling {} site(s) for export...", indexed_urls.len());
    let rows = export_csv(idx, indexed_urls, Path::new(EXPORT_FILE), concurrency).await?;
    println!("📄 Data exported to: {} ({} row(s))", EXPORT_FILE, rows);

    Ok(())
}

// =============================================================================
// Output helpers
// =============================================================================

// Reads one line from stdin after showing a message
// Returns Ok(None) when stdin is closed (EOF)
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Prints crawl outcomes as a human-readable table
fn print_crawl_table(outcomes: &[CrawlOutcome]) {
    println!("{:<60} {:<12} {:<30}", "URL", "STATUS", "DETAILS");
    println!("{}", "=".repeat(102));

    for outcome in outcomes {
        let url_display = truncate_for_display(&outcome.url);

        let (status, details) = match &outcome.record {
            Some(record) => ("✅ OK".to_string(), record.title.clone()),
            None => (
                "❌ FAILED".to_string(),
                outcome.error.clone().unwrap_or_default(),
            ),
        };

        println!("{:<60} {:<12} {:<30}", url_display, status, details);
    }

    println!();

    let ok_count = outcomes.iter().filter(|o| o.success).count();
    println!("📊 Summary:");
    println!("   ✅ Crawled: {}", ok_count);
    println!("   ❌ Failed: {}", outcomes.len() - ok_count);
    println!("   📋 Total: {}", outcomes.len());
}

// Truncates a URL to at most 57 characters for table display
//
// Cut on a character boundary, not a byte offset: URLs can contain
// multibyte characters (IRIs), and slicing mid-character panics.
fn truncate_for_display(url: &str) -> String {
    match url.char_indices().nth(57) {
        Some((byte_idx, _)) => format!("{}...", &url[..byte_idx]),
        None => url.to_string(),
    }
}

// Prints ranked search results as a numbered list
fn print_result_list(results: &[String]) {
    for (i, url) in results.iter().enumerate() {
        println!("{}. {}", i + 1, url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 56 ASCII chars followed by a multibyte char: the cut lands right
        // on the accent and must not split it
        let long = format!("{}é{}", "a".repeat(56), "b".repeat(20));
        let display = truncate_for_display(&long);
        assert!(display.ends_with("..."));
        assert_eq!(display.chars().count(), 60); // 57 kept + "..."

        let short = "https://example.com/";
        assert_eq!(truncate_for_display(short), short);
    }

    #[test]
    fn test_crawl_table_handles_multibyte_urls() {
        let outcome = CrawlOutcome {
            url: format!("https://example.com/{}", "é".repeat(50)),
            success: false,
            record: None,
            error: Some("server returned HTTP 404".to_string()),
        };

        // Must render without panicking on the long non-ASCII URL
        print_crawl_table(&[outcome]);
    }
}
