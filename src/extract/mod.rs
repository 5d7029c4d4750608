// src/extract/mod.rs
// =============================================================================
// Everything that reads page content lives here.
//
// Submodules:
// - phone: finds and canonicalizes German phone numbers
// - links: finds the next URLs to crawl
//
// Both are pure functions of their input: no network, no shared state.
// =============================================================================

mod links;
mod phone;

pub use links::{is_crawlable, DomLinkExtractor, HrefScanner, LinkExtractor};
pub use phone::PhoneExtractor;
