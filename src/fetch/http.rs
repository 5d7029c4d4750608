// src/fetch/http.rs
// =============================================================================
// This module is the only place that talks to the network.
//
// The crawl engine doesn't create HTTP requests itself. It's handed a
// `Fetcher` and calls `fetch(url, timeout)`. In the real binary that's
// `HttpFetcher` (reqwest underneath); in tests it's an in-memory fake.
//
// Failure modes are sorted into a small enum, the same way a link checker
// tells a timeout apart from a refused connection or a 404.
//
// Rust concepts:
// - async_trait: lets a trait have async methods and be used as dyn Fetcher
// - thiserror: derives Display/Error for our error enum
// =============================================================================

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

// The User-Agent sent with every request unless --user-agent overrides it
pub const DEFAULT_USER_AGENT: &str = concat!(
    "phone-harvester/",
    env!("CARGO_PKG_VERSION"),
    " (German phone number crawler)"
);

/// A page that came back from the server, whatever its status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the page was finally served from (after redirects).
    /// Relative links on the page resolve against this.
    pub url: Url,
    /// HTTP status of the final response (after redirects)
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body decoded as text
    pub body: String,
}

impl FetchedPage {
    // Turns 4xx/5xx responses into errors
    //
    // 2xx and 3xx are fine: redirects are normally followed by the
    // client already, and an unfollowed 3xx may still carry a body.
    pub fn ensure_success(self) -> Result<Self, FetchError> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(FetchError::Status {
                status: self.status,
            })
        } else {
            Ok(self)
        }
    }
}

/// Why a fetch didn't produce a usable page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response within the per-request timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// DNS failure, refused connection, TLS handshake failure...
    #[error("connection failed: {0}")]
    Connect(String),
    /// The server answered with 4xx or 5xx
    #[error("HTTP {status}")]
    Status { status: StatusCode },
    /// Headers arrived but the body couldn't be read
    #[error("failed to read body: {0}")]
    Body(String),
    /// Anything else reqwest complains about
    #[error("request failed: {0}")]
    Request(String),
}

// The fetch capability the crawl engine depends on
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

// Real fetcher backed by a reqwest Client
//
// The client is built once and reused, so connections to the same host
// get pooled across the whole crawl.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client with our identifying User-Agent header
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| categorize_error(e, timeout))?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        Ok(FetchedPage {
            url: final_url,
            status,
            headers,
            body,
        })
    }
}

// Sorts reqwest errors into our FetchError variants
fn categorize_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout)
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    fn page(status: u16) -> FetchedPage {
        FetchedPage {
            url: Url::parse("https://example.de/").unwrap(),
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    #[test]
    fn test_ensure_success_accepts_2xx_and_3xx() {
        assert!(page(200).ensure_success().is_ok());
        assert!(page(301).ensure_success().is_ok());
    }

    #[test]
    fn test_ensure_success_rejects_4xx_and_5xx() {
        assert!(matches!(
            page(404).ensure_success(),
            Err(FetchError::Status { status }) if status == StatusCode::NOT_FOUND
        ));
        assert!(page(503).ensure_success().is_err());
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/kontakt")
                    .header("user-agent", "test-agent/1.0");
                then.status(200)
                    .header("content-type", "text/html")
                    .body("<p>Tel. 030-1234567</p>");
            })
            .await;

        let fetcher = HttpFetcher::new("test-agent/1.0").unwrap();
        let url = Url::parse(&server.url("/kontakt")).unwrap();
        let page = fetcher.fetch(&url, Duration::from_secs(5)).await.unwrap();

        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.body, "<p>Tel. 030-1234567</p>");
        assert_eq!(page.headers.get("content-type").unwrap(), "text/html");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_returns_error_status_as_page() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let url = Url::parse(&server.url("/missing")).unwrap();
        let page = fetcher.fetch(&url, Duration::from_secs(5)).await.unwrap();

        assert_eq!(page.status, StatusCode::NOT_FOUND);
        assert!(page.ensure_success().is_err());
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(2)).body("late");
            })
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT).unwrap();
        let url = Url::parse(&server.url("/slow")).unwrap();
        let result = fetcher.fetch(&url, Duration::from_millis(100)).await;

        assert!(matches!(result, Err(FetchError::Timeout(_))));
    }
}
