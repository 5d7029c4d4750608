// src/extract/links.rs
// =============================================================================
// This module finds the links on a page that the crawler may follow next.
//
// Two implementations share one trait:
// - HrefScanner: a quick lexical scan for href="..." (the default)
// - DomLinkExtractor: parses the HTML properly with the `scraper` crate
//
// Both resolve relative links against the page's own URL with the `url`
// crate and keep only http/https URLs that have a host.
//
// Neither one ever fails: broken markup or weird hrefs just produce fewer
// links, because page content is never trusted to be well-formed.
//
// Rust concepts:
// - Traits: the crawl engine only sees `&dyn LinkExtractor`
// - HashSet: to drop duplicate links while keeping document order
// =============================================================================

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Anything that can pull follow-able links out of a page
//
// Send + Sync so the engine can hold it across .await points
pub trait LinkExtractor: Send + Sync {
    // Returns absolute, crawlable URLs in the order they appear on the page.
    // Each URL appears at most once.
    fn extract_links(&self, markup: &str, base: &Url) -> Vec<Url>;
}

// Best-effort scanner that looks for href="..." or href='...'
//
// It doesn't understand HTML at all, which is exactly why it's fast and
// why it happily works on half-downloaded or broken pages.
#[derive(Debug, Clone)]
pub struct HrefScanner {
    href: Regex,
}

impl HrefScanner {
    pub fn new() -> Self {
        Self {
            href: Regex::new(r#"(?i)href\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
                .expect("href pattern must compile"),
        }
    }
}

impl Default for HrefScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HrefScanner {
    fn extract_links(&self, markup: &str, base: &Url) -> Vec<Url> {
        let hrefs = self
            .href
            .captures_iter(markup)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str());

        collect_crawlable(hrefs, base)
    }
}

// Structural alternative built on a real HTML parser
//
// Picks up <a>, <area> and <link> elements with an href attribute.
// Entities like &amp; inside href values get decoded by the parser,
// which the lexical scanner can't do.
#[derive(Debug, Clone)]
pub struct DomLinkExtractor {
    selector: Selector,
}

impl DomLinkExtractor {
    pub fn new() -> Self {
        // Constant selector, known to be valid
        let selector = Selector::parse("a[href], area[href], link[href]")
            .expect("link selector must parse");
        Self { selector }
    }
}

impl Default for DomLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for DomLinkExtractor {
    fn extract_links(&self, markup: &str, base: &Url) -> Vec<Url> {
        let document = Html::parse_document(markup);
        let hrefs = document
            .select(&self.selector)
            .filter_map(|element| element.value().attr("href"));

        collect_crawlable(hrefs, base)
    }
}

// Checks that a URL is something we can fetch
//
// Rules:
//   - scheme is http or https
//   - host is present and not empty
pub fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|host| !host.is_empty())
}

// Resolves each href against the base, keeps only crawlable ones and
// removes duplicates (first occurrence wins)
fn collect_crawlable<'a>(hrefs: impl Iterator<Item = &'a str>, base: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        let resolved = match base.join(href.trim()) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Dropping unresolvable href '{}' on {}: {}", href, base, e);
                continue;
            }
        };

        if !is_crawlable(&resolved) {
            tracing::debug!("Dropping non-crawlable link {} on {}", resolved, base);
            continue;
        }

        if seen.insert(resolved.as_str().to_string()) {
            links.push(resolved);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.de/contact").unwrap()
    }

    fn scan(html: &str) -> Vec<String> {
        HrefScanner::new()
            .extract_links(html, &base())
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_resolve_root_relative_link() {
        assert_eq!(scan(r#"<a href="/imprint">Impressum</a>"#), vec!["https://example.de/imprint"]);
    }

    #[test]
    fn test_skip_mailto_and_javascript() {
        let html = r#"<a href="mailto:x@y.de">Mail</a> <a href="javascript:void(0)">JS</a>"#;
        assert!(scan(html).is_empty());
    }

    #[test]
    fn test_path_relative_and_scheme_relative() {
        let html = r#"<a href="team.html">Team</a><a href="//cdn.example.org/a">CDN</a>"#;
        assert_eq!(
            scan(html),
            vec!["https://example.de/team.html", "https://cdn.example.org/a"]
        );
    }

    #[test]
    fn test_fragment_only_reference_keeps_fragment() {
        assert_eq!(scan(r##"<a href="#top">Top</a>"##), vec!["https://example.de/contact#top"]);
    }

    #[test]
    fn test_single_quotes_and_uppercase_attribute() {
        assert_eq!(scan("<A HREF='/about'>About</A>"), vec!["https://example.de/about"]);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let html = r#"<a href="/a">1</a><a href="/b">2</a><a href="/a">3</a>"#;
        assert_eq!(scan(html), vec!["https://example.de/a", "https://example.de/b"]);
    }

    #[test]
    fn test_malformed_markup_does_not_fail() {
        assert!(scan(r#"<a href="unterminated <div"#).is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_dom_extractor_matches_scanner_on_simple_page() {
        let html = r#"<html><body>
            <a href="/imprint">Impressum</a>
            <a href="mailto:x@y.de">Mail</a>
            <area href="map.html">
        </body></html>"#;
        let links: Vec<String> = DomLinkExtractor::new()
            .extract_links(html, &base())
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(links, vec!["https://example.de/imprint", "https://example.de/map.html"]);
    }

    #[test]
    fn test_dom_extractor_decodes_entities() {
        let html = r#"<a href="/search?a=1&amp;b=2">Search</a>"#;
        let links = DomLinkExtractor::new().extract_links(html, &base());
        assert_eq!(links[0].as_str(), "https://example.de/search?a=1&b=2");
    }

    #[test]
    fn test_is_crawlable() {
        assert!(is_crawlable(&Url::parse("http://example.de/").unwrap()));
        assert!(!is_crawlable(&Url::parse("ftp://example.de/").unwrap()));
        assert!(!is_crawlable(&Url::parse("file:///etc/hosts").unwrap()));
    }
}
