//! Page retrieval.
//!
//! Pages are normally fetched through a chain of public CORS proxies with a
//! last-resort fetch API behind them. The direct path (used by the
//! `/fetch-html` endpoint) requests the page itself with browser headers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Shown to the user when no source could deliver the page.
pub const UNREACHABLE_MESSAGE: &str =
    "Could not retrieve the website content. Please check the URL and try again.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Where and how to fetch pages.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Proxy prefixes; the encoded target URL is appended to each.
    pub proxies: Vec<String>,
    /// Prefix of the fetch API tried after every proxy failed.
    pub fallback_api: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            proxies: default_proxies(),
            fallback_api: "https://api.codetabs.com/v1/proxy?quest=".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 10,
        }
    }
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub fn default_proxies() -> Vec<String> {
    vec![
        "https://corsproxy.io/?".to_string(),
        "https://api.allorigins.win/raw?url=".to_string(),
        "https://cors-anywhere.herokuapp.com/".to_string(),
    ]
}

/// Adds `https://` to scheme-less input.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Percent-encodes a query component. Spaces become `%20`; a literal `+` is
/// already `%2B`, so every `+` left is a space.
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Fetches page HTML.
pub struct HtmlFetcher {
    options: FetchOptions,
    client: reqwest::Client,
}

impl HtmlFetcher {
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { options, client })
    }

    /// Tries each proxy in order, then the fallback API.
    ///
    /// Individual failures are logged and skipped; only the final outcome is
    /// reported.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let normalized = normalize_url(url);
        let encoded = encode_component(&normalized);
        info!("Fetching HTML from: {}", normalized);

        for proxy in &self.options.proxies {
            let proxy_url = format!("{}{}", proxy, encoded);
            debug!("Trying proxy: {}", proxy_url);

            match self.get_text(&proxy_url).await {
                Ok(html) => {
                    info!("HTML fetched via {} ({} bytes)", proxy, html.len());
                    return Ok(html);
                }
                Err(e) => warn!("Proxy {} failed: {}", proxy, e),
            }
        }

        let api_url = format!("{}{}", self.options.fallback_api, encoded);
        debug!("Trying public fetch API: {}", api_url);
        match self.get_text(&api_url).await {
            Ok(html) if !html.is_empty() => {
                info!("HTML fetched via public API ({} bytes)", html.len());
                return Ok(html);
            }
            Ok(_) => warn!("Public fetch API returned an empty body"),
            Err(e) => warn!("Public fetch API failed: {}", e),
        }

        Err(FetchError::Unreachable)
    }

    /// Requests the page itself with desktop browser headers.
    pub async fn fetch_direct(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching HTML directly from: {}", url);

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.options.user_agent)
            .headers(headers)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| request_error(url, e))
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| request_error(url, e))
    }
}

fn request_error(url: &str, e: reqwest::Error) -> FetchError {
    FetchError::Request {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;

    /// Local stand-in for the proxies: `/ok` echoes the target, `/down` fails,
    /// `/empty` answers with nothing, `/page` checks browser headers.
    async fn spawn_proxy() -> String {
        async fn ok(Query(params): Query<HashMap<String, String>>) -> String {
            format!("<html>{}</html>", params.get("url").cloned().unwrap_or_default())
        }
        async fn down() -> StatusCode {
            StatusCode::BAD_GATEWAY
        }
        async fn empty() -> &'static str {
            ""
        }
        async fn page(headers: AxumHeaders) -> (StatusCode, String) {
            let agent = headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            let language = headers
                .get("accept-language")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if agent.starts_with("Mozilla/5.0") && language == "en-US,en;q=0.5" {
                (StatusCode::OK, "<html>direct</html>".to_string())
            } else {
                (StatusCode::FORBIDDEN, String::new())
            }
        }

        let app = Router::new()
            .route("/ok", get(ok))
            .route("/down", get(down))
            .route("/empty", get(empty))
            .route("/page", get(page));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn options(proxies: Vec<String>, fallback_api: String) -> FetchOptions {
        FetchOptions {
            proxies,
            fallback_api,
            timeout_seconds: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  http://example.com/a "), "http://example.com/a");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(
            encode_component("https://example.com/a?b=c"),
            "https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"
        );
        assert_eq!(
            encode_component("https://example.com/search?q=red shoes+socks"),
            "https%3A%2F%2Fexample.com%2Fsearch%3Fq%3Dred%20shoes%2Bsocks"
        );
    }

    #[tokio::test]
    async fn test_scheme_less_input_is_fetched_over_https() {
        let base = spawn_proxy().await;
        let fetcher = HtmlFetcher::new(options(
            vec![format!("{}/ok?url=", base)],
            "http://127.0.0.1:1/?quest=".into(),
        ))
        .unwrap();
        let html = fetcher.fetch("example.com").await.unwrap();
        assert_eq!(html, "<html>https://example.com</html>");
    }

    #[tokio::test]
    async fn test_falls_through_failing_proxies() {
        let base = spawn_proxy().await;
        let fetcher = HtmlFetcher::new(options(
            vec![
                "http://127.0.0.1:1/?url=".to_string(),
                format!("{}/down?url=", base),
                format!("{}/ok?url=", base),
            ],
            "http://127.0.0.1:1/?quest=".into(),
        ))
        .unwrap();
        let html = fetcher.fetch("https://example.org").await.unwrap();
        assert!(html.contains("example.org"));
    }

    #[tokio::test]
    async fn test_fallback_api_used_last() {
        let base = spawn_proxy().await;
        let fetcher = HtmlFetcher::new(options(
            vec![format!("{}/down?url=", base)],
            format!("{}/ok?url=", base),
        ))
        .unwrap();
        assert!(fetcher.fetch("example.net").await.unwrap().contains("https://example.net"));
    }

    #[tokio::test]
    async fn test_everything_failing_gives_one_error() {
        let base = spawn_proxy().await;
        let fetcher = HtmlFetcher::new(options(
            vec!["http://127.0.0.1:1/?url=".to_string(), format!("{}/down?url=", base)],
            format!("{}/empty?quest=", base),
        ))
        .unwrap();
        let err = fetcher.fetch("example.com").await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable));
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_direct_fetch_sends_browser_headers() {
        let base = spawn_proxy().await;
        let fetcher = HtmlFetcher::new(FetchOptions::default()).unwrap();
        let html = fetcher.fetch_direct(&format!("{}/page", base)).await.unwrap();
        assert_eq!(html, "<html>direct</html>");

        let err = fetcher.fetch_direct(&format!("{}/down", base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 502, .. }));
    }
}
