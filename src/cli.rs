// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// webseek has two one-shot subcommands for scripted use (crawl, search)
// and drops into the interactive shell when run with no subcommand.
// =============================================================================

use clap::{Parser, Subcommand};

use crate::spider::DEFAULT_CONCURRENCY;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "webseek",
    version = "0.1.0",
    about = "A CLI search engine that crawls websites and answers keyword queries",
    long_about = "webseek fetches web pages, extracts their content into an in-memory \
                  inverted index, and answers free-text queries with a ranked URL list. \
                  Run it without a subcommand for the interactive shell."
)]
pub struct Cli {
    // No subcommand means the interactive shell
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Maximum number of pages fetched concurrently
    ///
    /// Applies to every crawl the tool performs, including re-crawls during
    /// CSV export
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

// One-shot subcommands, for CI pipelines and scripting
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl one or more URLs and report the outcome of each
    ///
    /// Example: webseek crawl https://example.com https://rust-lang.org
    Crawl {
        /// URLs to crawl (at least one)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Crawl seed URLs, index them, and run a single query
    ///
    /// Example: webseek search "rust language" --seed https://rust-lang.org
    Search {
        /// Free-text query
        query: String,

        /// Seed URL to crawl and index before querying (repeatable)
        #[arg(long = "seed", required = true)]
        seeds: Vec<String>,

        /// Output the ranked URLs as a JSON array
        #[arg(long)]
        json: bool,
    },
}
