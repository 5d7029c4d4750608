// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Visited set so no page is fetched twice, even on sites with cycles
// - Two caps: how many URLs to discover and how many numbers to collect
// - Polite crawling with a delay between requests
// - Clean stop on Ctrl-C, keeping what was found so far
//
// Submodules:
// - engine: the crawl loop and its config/report types
// - frontier: the per-run queue and sets the loop works on
// - seed: turns user input into a start URL
// =============================================================================

mod engine;
mod frontier;
mod seed;

pub use engine::{crawl, CrawlConfig, CrawlReport};
pub use seed::normalize_seed;
