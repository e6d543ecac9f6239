// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "link-trail",
    version,
    about = "Find a chain of links from one wiki page to another",
    long_about = "link-trail starts at one wiki page and follows its article links, many pages \
                  at a time, until it reaches a page with the title you are looking for. \
                  It then prints the chain of page titles that leads there."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log every page as it is searched (same as RUST_LOG=link_trail=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for a page by title, starting from a URL
    ///
    /// Example: link-trail search https://en.wikipedia.org/wiki/Hatsune_Miku "Online shopping"
    Search(SearchArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Page to start from (e.g., https://en.wikipedia.org/wiki/Rust)
    pub start_url: String,

    /// Exact title of the page to find (without the site suffix)
    pub target: String,

    /// How many link hops away from the start page to look
    ///
    /// Depth 0 = only the start page
    /// Depth 1 = start page + every page it links to
    /// etc.
    #[arg(long, default_value_t = 3)]
    pub max_depth: usize,

    /// How many pages to fetch at the same time
    #[arg(long, default_value_t = 32)]
    pub workers: usize,

    /// Text removed from the end of every page title
    #[arg(long, default_value = " - Wikipedia")]
    pub title_suffix: String,

    /// CSS selector of the article body; only links inside it are followed
    #[arg(long, default_value = ".mw-parser-output")]
    pub content_selector: String,

    /// Only hrefs starting with this prefix are followed
    #[arg(long, default_value = "/wiki/")]
    pub link_prefix: String,

    /// Extra attempts for a page that failed with a timeout or a 5xx (0-10)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub retries: u32,

    /// Timeout for a single page request, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// File the path is written to when the target is found
    #[arg(long, short, default_value = "path.txt")]
    pub output: PathBuf,

    /// Also write every visited page (depth, title, URL) to this file
    #[arg(long)]
    pub visited_output: Option<PathBuf>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
