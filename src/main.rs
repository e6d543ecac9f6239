// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the page fetcher, the link extractor and the search engine
// 3. Run the search (Ctrl-C cancels it)
// 4. Print the result and exit with a proper code
//    (0 = found, 1 = not found or cancelled, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SearchArgs};
use link_trail::logging::init_logging;
use link_trail::page::{HtmlExtractor, HttpFetcher};
use link_trail::search::{
    write_entries, FileSink, SearchConfig, SearchEngine, SearchOutcome, SearchReport,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Search(args) => handle_search(args).await,
    }
}

// Handles the 'search' subcommand
async fn handle_search(args: SearchArgs) -> Result<i32> {
    let config = SearchConfig::new(&args.start_url, &args.target, args.max_depth, args.workers)?;
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs), args.retries)?;
    let extractor =
        HtmlExtractor::new(&args.title_suffix, &args.content_selector, &args.link_prefix)?;

    if !args.json {
        println!("🔍 Searching for \"{}\" from {}", config.target, config.start_url);
        println!("📊 Max depth: {}, workers: {}", config.max_depth, config.workers);
    }

    let engine = SearchEngine::new(
        config,
        Arc::new(fetcher),
        Arc::new(extractor),
        Arc::new(FileSink::new(args.output.clone())),
    );

    // Ctrl-C stops the search; the run then reports "cancelled"
    let canceller = engine.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let report = engine.run().await;

    if let Some(file) = &args.visited_output {
        if let Err(e) = write_entries(file, &engine.entries()).await {
            warn!(error = %e, "could not write visited pages");
        }
    }

    print_report(&report, &args)?;

    Ok(if report.is_found() { 0 } else { 1 })
}

// Prints the report either as text or JSON
fn print_report(report: &SearchReport, args: &SearchArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    println!();
    match &report.outcome {
        SearchOutcome::Found(winner) => {
            println!("✅ Found \"{}\" at {}", args.target, winner.url);
            println!("   Path from start to goal:");
            println!("   {}", winner.path);
            println!("   (written to {})", args.output.display());
        }
        SearchOutcome::NotFound { max_depth } => {
            println!("❌ \"{}\" not found within depth {}", args.target, max_depth);
        }
        SearchOutcome::Cancelled => {
            println!("⚠️  Search cancelled");
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages visited: {}", report.pages_visited);
    println!("   🔗 URLs claimed: {}", report.urls_claimed);
    Ok(())
}
