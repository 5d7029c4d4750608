// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below *is* the CLI. Every field
// becomes an argument or a flag, and the doc comments become --help text.
//
// Rust concepts:
// - Structs: group all the options together
// - Enums + ValueEnum: a flag that only accepts a fixed set of values
// - Derive macros: clap generates the parsing code for us
// =============================================================================

use clap::{Parser, ValueEnum};
use std::time::Duration;

use crate::crawl::CrawlConfig;
use crate::fetch::DEFAULT_USER_AGENT;

// All command-line options
#[derive(Parser, Debug)]
#[command(
    name = "phone-harvester",
    version = "0.1.0",
    about = "Crawl a website and collect German phone numbers",
    long_about = "phone-harvester follows links breadth-first from a start page and \
                  collects every German phone number it finds, normalized to +49 form."
)]
pub struct Cli {
    /// Website to crawl (e.g., example.de or https://example.de/kontakt)
    ///
    /// https:// is added when no scheme is given.
    /// If omitted, you'll be asked for it interactively.
    pub url: Option<String>,

    /// Stop after collecting this many phone numbers
    #[arg(long, default_value_t = 100)]
    pub max_numbers: usize,

    /// Stop discovering new links once this many URLs have been seen
    #[arg(long, default_value_t = 50)]
    pub max_urls: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "5", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Pause between requests in seconds
    #[arg(long, default_value = "1", value_parser = parse_seconds)]
    pub delay: Duration,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// How links are found on a page
    #[arg(long, value_enum, default_value_t = LinkParser::Regex)]
    pub parser: LinkParser,

    /// Print the full crawl report as JSON instead of a numbered list
    #[arg(long)]
    pub json: bool,

    /// Show debug logging (same as RUST_LOG=phone_harvester=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which link extractor to use.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkParser {
    /// Fast lexical scan for href="..." values
    Regex,
    /// Full HTML parse, picks up <a>, <area> and <link> elements
    Dom,
}

impl Cli {
    // Collects the crawl-related options into a CrawlConfig
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_numbers: self.max_numbers,
            max_urls: self.max_urls,
            timeout: self.timeout,
            delay: self.delay,
            user_agent: self.user_agent.clone(),
        }
    }
}

// Parses "5", "0.5", "2.25" into a Duration
fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", s))?;

    Duration::try_from_secs_f64(secs).map_err(|_| format!("'{}' must be zero or positive", s))
}
