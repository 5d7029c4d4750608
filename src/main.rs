// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Get the seed URL (argument or interactive prompt) and validate it
// 4. Run the crawl, stopping cleanly on Ctrl-C
// 5. Print the phone numbers and exit with a code:
//    0 = completed, 130 = interrupted (partial results printed), 2 = error
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the breadth-first crawl loop
mod extract; // src/extract/ - phone number and link extraction
mod fetch; // src/fetch/ - HTTP fetching

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use cli::{Cli, LinkParser};
use crawl::CrawlReport;
use extract::{DomLinkExtractor, HrefScanner, LinkExtractor, PhoneExtractor};
use fetch::HttpFetcher;

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries results (and stays valid JSON)
fn init_logging(verbose: bool) {
    let default = if verbose {
        "phone_harvester=debug"
    } else {
        "phone_harvester=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let input = match &cli.url {
        Some(url) => url.clone(),
        None => prompt_for_url(io::stdin().lock(), io::stderr())?,
    };

    // Blank or unusable input stops here, before any request is made
    let seed = crawl::normalize_seed(&input)?;
    let config = cli.crawl_config();

    let fetcher = HttpFetcher::new(&config.user_agent).context("failed to create HTTP client")?;
    let links: Box<dyn LinkExtractor> = match cli.parser {
        LinkParser::Regex => Box::new(HrefScanner::new()),
        LinkParser::Dom => Box::new(DomLinkExtractor::new()),
    };
    let phones = PhoneExtractor::new();

    // Ctrl-C flips the token; the crawl loop notices and returns early
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing up...");
            ctrl_c_token.cancel();
        }
    });

    tracing::info!(
        "Starting crawl of {} (max {} numbers, max {} URLs)",
        seed,
        config.max_numbers,
        config.max_urls
    );

    let report = crawl::crawl(seed, &config, &fetcher, links.as_ref(), &phones, &cancel).await;

    print_report(&report, cli.json)?;

    if report.interrupted {
        Ok(EXIT_INTERRUPTED)
    } else {
        Ok(EXIT_OK)
    }
}

// Asks for the start URL
//
// main passes stdin and stderr, so --json output on stdout stays parseable
fn prompt_for_url(mut input: impl BufRead, mut prompt: impl Write) -> Result<String> {
    write!(prompt, "Enter the website URL to scrape: ").context("failed to write prompt")?;
    prompt.flush().context("failed to write prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;

    Ok(line)
}

// Prints the results either as a numbered list or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!();
    if report.interrupted {
        println!("Scraping interrupted. Found {} phone numbers so far:", report.numbers.len());
    } else {
        println!("Scraping completed. Found {} phone numbers:", report.numbers.len());
    }
    println!("{}", "=".repeat(50));

    for (i, number) in report.numbers.iter().enumerate() {
        println!("{}. {}", i + 1, number);
    }

    Ok(())
}
