// src/crawl/engine.rs
// =============================================================================
// This module runs the crawl itself, breadth-first from one seed URL.
//
// How it works:
// 1. Put the seed in the frontier and mark it visited
// 2. Pop the next URL and fetch it
// 3. Pull phone numbers out of the body and add them to the result set
// 4. While under the URL cap, queue every new link found on the page
// 5. Wait a bit (polite crawling), then repeat
//
// The loop stops when:
// - the frontier is empty
// - enough phone numbers have been found
// - the cancellation token fires (Ctrl-C)
//
// A page that fails to load is logged and skipped. It never ends the crawl.
//
// Everything the loop mutates (frontier, visited set, numbers) is a local
// variable of `crawl()`, so a second run always starts from scratch.
// =============================================================================

use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::frontier::{Frontier, PhoneNumberSet, VisitedSet};
use crate::extract::{LinkExtractor, PhoneExtractor};
use crate::fetch::{FetchError, FetchedPage, Fetcher, DEFAULT_USER_AGENT};

/// Limits and timings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Stop once this many phone numbers have been collected
    pub max_numbers: usize,
    /// Stop discovering new links once this many URLs are marked visited
    pub max_urls: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Pause after every processed page
    pub delay: Duration,
    /// Sent as the User-Agent header on every request
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_numbers: 100,
            max_urls: 50,
            timeout: Duration::from_secs(5),
            delay: Duration::from_secs(1),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// What a crawl run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// The URL the crawl started from
    pub seed: String,
    /// Canonical phone numbers, sorted, at most `max_numbers` of them
    pub numbers: Vec<String>,
    /// Pages fetched and scanned successfully
    pub pages_fetched: usize,
    /// Pages that failed to load (network error, timeout, 4xx/5xx)
    pub pages_failed: usize,
    /// Distinct URLs claimed during the run
    pub urls_visited: usize,
    /// True when the run was cut short by cancellation
    pub interrupted: bool,
}

// Crawls breadth-first from `seed` and collects phone numbers
//
// Parameters:
//   seed: absolute http/https URL to start from
//   config: caps, timeout and delay
//   fetcher: how pages are downloaded (real HTTP or a test fake)
//   links: how the next URLs are found on a page
//   phones: the phone number extractor
//   cancel: fires when the operator aborts; partial results are returned
//
// Returns: a CrawlReport (never fails; page errors are counted, not raised)
pub async fn crawl(
    seed: Url,
    config: &CrawlConfig,
    fetcher: &dyn Fetcher,
    links: &dyn LinkExtractor,
    phones: &PhoneExtractor,
    cancel: &CancellationToken,
) -> CrawlReport {
    let mut frontier = Frontier::new();
    let mut visited = VisitedSet::new();
    let mut numbers = PhoneNumberSet::new();

    let mut report = CrawlReport {
        seed: seed.to_string(),
        ..CrawlReport::default()
    };

    visited.claim(&seed);
    frontier.push(seed);

    while numbers.len() < config.max_numbers {
        if cancel.is_cancelled() {
            report.interrupted = true;
            break;
        }

        let Some(url) = frontier.pop() else {
            break;
        };

        tracing::info!("Scraping: {}", url);

        // An in-flight request is dropped as soon as the token fires
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                report.interrupted = true;
                break;
            }
            result = fetch_page(fetcher, &url, config.timeout) => result,
        };

        match outcome {
            Ok(page) => {
                report.pages_fetched += 1;
                tracing::debug!(
                    "Fetched {} ({}, {})",
                    page.url,
                    page.status,
                    page
                        .headers
                        .get(reqwest::header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("no content type")
                );

                let found = phones.extract(&page.body);
                if !found.is_empty() {
                    let total = found.len();
                    let new = numbers.merge(found);
                    tracing::info!("Found {} phone numbers on {} ({} new)", total, url, new);
                }

                // After a redirect the page lives at a different URL; claim
                // it too so links back to it don't fetch the page again.
                visited.claim(&page.url);

                // The cap only stops discovery; anything already queued
                // still gets fetched.
                if visited.len() < config.max_urls {
                    let mut queued = 0;
                    for link in links.extract_links(&page.body, &page.url) {
                        if visited.claim(&link) {
                            frontier.push(link);
                            queued += 1;
                        }
                    }
                    tracing::debug!(
                        "Queued {} new links from {} ({} waiting)",
                        queued,
                        url,
                        frontier.len()
                    );
                }
            }
            Err(e) => {
                report.pages_failed += 1;
                tracing::warn!("Error scraping {}: {}", url, e);
            }
        }

        // Be polite: pause after every page, whatever happened
        if !config.delay.is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    report.interrupted = true;
                    break;
                }
                _ = tokio::time::sleep(config.delay) => {}
            }
        }
    }

    if !frontier.is_empty() {
        tracing::debug!("{} queued URLs were never fetched", frontier.len());
    }

    report.urls_visited = visited.len();
    report.numbers = numbers.into_capped_vec(config.max_numbers);

    tracing::info!(
        "Crawl finished: {} pages fetched, {} failed, {} numbers",
        report.pages_fetched,
        report.pages_failed,
        report.numbers.len()
    );

    report
}

// Fetches a page and treats 4xx/5xx as failures
async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &Url,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    fetcher.fetch(url, timeout).await?.ensure_success()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is tokio::select!?
//    - Waits on several futures at once and runs the branch of whichever
//      finishes first; the others are dropped
//    - `biased;` makes it check branches top to bottom, so cancellation
//      always wins a tie
//
// 2. What is a CancellationToken?
//    - A cheap, cloneable flag from tokio-util
//    - One clone lives in the Ctrl-C task, the other in the crawl loop
//    - cancelled() is a future that completes once cancel() is called
//
// 3. Why &dyn Fetcher instead of a concrete type?
//    - The loop doesn't care where pages come from
//    - main passes the reqwest fetcher, tests pass an in-memory fake
//
// 4. Why mark URLs visited when they're queued?
//    - If we waited until they're fetched, a link that appears on many
//      pages would sit in the queue many times
// -----------------------------------------------------------------------------
