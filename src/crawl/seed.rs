// src/crawl/seed.rs
// =============================================================================
// Turns whatever the user typed into a URL the crawler can start from.
//
// - Surrounding whitespace is ignored
// - Blank input is rejected before any network activity
// - "example.de" becomes "https://example.de/"
// =============================================================================

use anyhow::{bail, Context, Result};
use url::Url;

use crate::extract::is_crawlable;

pub fn normalize_seed(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("no URL given, please provide a website to crawl");
    }

    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme)
        .with_context(|| format!("invalid URL '{}'", trimmed))?;

    if !is_crawlable(&url) {
        bail!("URL '{}' has no host to crawl", trimmed);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_when_scheme_missing() {
        let url = normalize_seed("example.de").unwrap();
        assert_eq!(url.as_str(), "https://example.de/");
    }

    #[test]
    fn test_keeps_http_scheme() {
        let url = normalize_seed("  http://example.de/kontakt  ").unwrap();
        assert_eq!(url.as_str(), "http://example.de/kontakt");
    }

    #[test]
    fn test_rejects_blank_input() {
        assert!(normalize_seed("").is_err());
        assert!(normalize_seed("   \t").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(normalize_seed("https://").is_err());
    }
}
