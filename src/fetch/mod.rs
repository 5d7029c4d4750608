// src/fetch/mod.rs
// =============================================================================
// This module provides the HTTP side of the crawler.
//
// Submodules:
// - http: the Fetcher trait, the reqwest implementation and error types
// =============================================================================

mod http;

pub use http::{FetchError, FetchedPage, Fetcher, HttpFetcher, DEFAULT_USER_AGENT};
