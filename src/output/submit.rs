//! Search engine sitemap submission.
//!
//! Each endpoint is a URL template that the percent-encoded sitemap URL is
//! appended to. Requests go through an [`HttpGet`] implementation so tests
//! and callers without network access can substitute their own.

use crate::error::Result;
use crate::log;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Ping endpoints used when none are configured.
pub const DEFAULT_ENDPOINTS: [&str; 2] = [
    "https://www.google.com/ping?sitemap=",
    "https://www.bing.com/ping?sitemap=",
];

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Everything except unreserved characters is encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP GET.
pub trait HttpGet {
    fn get(&self, url: &str) -> std::result::Result<HttpResponse, BoxError>;
}

/// Outcome of one ping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingResult {
    /// Short label such as `google`.
    pub site: String,
    pub request_url: String,
    /// HTTP status, or `0` when the request never completed.
    pub status: u16,
    /// Response body without markup, on a single line.
    pub message: String,
}

impl PingResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct Submitter {
    client: Box<dyn HttpGet>,
    endpoints: Vec<String>,
}

impl Submitter {
    pub fn new(client: Box<dyn HttpGet>, endpoints: Vec<String>) -> Self {
        Self { client, endpoints }
    }

    /// Submitter backed by the built-in HTTP client.
    pub fn with_default_client(endpoints: Vec<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::new(default_client(timeout)?, endpoints))
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Ping every endpoint in order. Failures are reported per endpoint.
    pub fn submit(&self, sitemap_url: &str) -> Vec<PingResult> {
        self.endpoints
            .iter()
            .map(|template| {
                let request_url = ping_url(template, sitemap_url);
                let (status, message) = match self.client.get(&request_url) {
                    Ok(response) => (response.status, strip_markup(&response.body)),
                    Err(e) => (0, e.to_string()),
                };
                let result = PingResult {
                    site: site_label(template),
                    request_url,
                    status,
                    message,
                };
                log!("submit"; "{} -> {}", result.site, result.status);
                result
            })
            .collect()
    }
}

/// Endpoint template followed by the percent-encoded sitemap URL.
pub fn ping_url(template: &str, sitemap_url: &str) -> String {
    format!("{template}{}", utf8_percent_encode(sitemap_url, QUERY_VALUE))
}

/// Second-level name of the endpoint host (`www.bing.com` → `bing`).
pub fn site_label(template: &str) -> String {
    let host = url::Url::parse(template)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| template.to_string());

    let labels: Vec<&str> = host.split('.').collect();
    match labels.len() {
        0 | 1 => host.clone(),
        n => labels[n - 2].to_string(),
    }
}

/// Drop tags and collapse all whitespace (newlines included) to single spaces.
pub fn strip_markup(body: &str) -> String {
    static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
    static SPACE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[ \t\r\n\x0C]+").unwrap());

    let text = TAG.replace_all(body, " ");
    SPACE.replace_all(&text, " ").trim().to_string()
}

/// Built-in client, or `CapabilityUnavailable` when compiled without it.
#[cfg(feature = "submit")]
pub fn default_client(timeout: Duration) -> Result<Box<dyn HttpGet>> {
    Ok(Box::new(UreqClient::new(timeout)))
}

#[cfg(not(feature = "submit"))]
pub fn default_client(_timeout: Duration) -> Result<Box<dyn HttpGet>> {
    Err(crate::error::SitemapError::CapabilityUnavailable(
        "HTTP client (build with the `submit` feature)",
    ))
}

#[cfg(feature = "submit")]
pub use client::UreqClient;

#[cfg(feature = "submit")]
mod client {
    use super::{BoxError, HttpGet, HttpResponse};
    use std::time::Duration;
    use ureq::Agent;

    /// `ureq` agent that reports every status instead of erroring on 4xx/5xx.
    pub struct UreqClient {
        agent: Agent,
    }

    impl UreqClient {
        pub fn new(timeout: Duration) -> Self {
            let agent = Agent::config_builder()
                .timeout_global(Some(timeout))
                .http_status_as_error(false)
                .build()
                .into();
            Self { agent }
        }
    }

    impl HttpGet for UreqClient {
        fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
            let response = self.agent.get(url).call()?;
            let status = response.status().as_u16();
            let body = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read response body)".to_string());
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers every request from a fixed script.
    struct FakeClient {
        reply: fn(&str) -> std::result::Result<HttpResponse, BoxError>,
    }

    impl HttpGet for FakeClient {
        fn get(&self, url: &str) -> std::result::Result<HttpResponse, BoxError> {
            (self.reply)(url)
        }
    }

    fn endpoints() -> Vec<String> {
        DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ping_url_encodes_sitemap() {
        assert_eq!(
            ping_url(
                "https://www.google.com/ping?sitemap=",
                "https://example.com/sitemap index.xml?x=1&y=2"
            ),
            "https://www.google.com/ping?sitemap=https%3A%2F%2Fexample.com%2Fsitemap%20index.xml%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_site_label() {
        assert_eq!(site_label("https://www.google.com/ping?sitemap="), "google");
        assert_eq!(site_label("https://bing.com/ping?sitemap="), "bing");
        assert_eq!(site_label("http://localhost:8080/ping?u="), "localhost");
    }

    #[test]
    fn test_strip_markup() {
        let body = "<html>\n<body>\n<h2>Sitemap Notification Received</h2>\n<p>Your sitemap\nhas been added.</p>\n</body></html>";
        assert_eq!(
            strip_markup(body),
            "Sitemap Notification Received Your sitemap has been added."
        );
        assert_eq!(strip_markup("plain\r\n\r\ntext"), "plain text");
        assert_eq!(strip_markup("a\t\x0Cb  <br/>\n c"), "a b c");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_submit_all_endpoints() {
        let client = FakeClient {
            reply: |_| {
                Ok(HttpResponse {
                    status: 200,
                    body: "<p>OK</p>".into(),
                })
            },
        };
        let submitter = Submitter::new(Box::new(client), endpoints());
        let results = submitter.submit("https://example.com/sitemap.xml");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].site, "google");
        assert_eq!(results[1].site, "bing");
        assert!(results.iter().all(PingResult::is_success));
        assert!(results.iter().all(|r| r.message == "OK"));
        assert_eq!(
            results[1].request_url,
            "https://www.bing.com/ping?sitemap=https%3A%2F%2Fexample.com%2Fsitemap.xml"
        );
    }

    #[test]
    fn test_submit_reports_failures_per_endpoint() {
        let client = FakeClient {
            reply: |url| {
                if url.contains("google") {
                    Err("connection refused".into())
                } else {
                    Ok(HttpResponse {
                        status: 410,
                        body: "<h1>Gone</h1>".into(),
                    })
                }
            },
        };
        let submitter = Submitter::new(Box::new(client), endpoints());
        let results = submitter.submit("https://example.com/sitemap.xml");

        assert_eq!(results[0].status, 0);
        assert_eq!(results[0].message, "connection refused");
        assert_eq!(results[1].status, 410);
        assert_eq!(results[1].message, "Gone");
        assert!(!results[1].is_success());
    }

    #[test]
    fn test_submit_without_endpoints() {
        let client = FakeClient {
            reply: |_| Err("unreachable".into()),
        };
        let submitter = Submitter::new(Box::new(client), Vec::new());
        assert!(submitter.submit("https://example.com/sitemap.xml").is_empty());
    }

    #[cfg(not(feature = "submit"))]
    #[test]
    fn test_default_client_unavailable() {
        let err = default_client(Duration::from_secs(1)).err().unwrap();
        assert!(matches!(
            err,
            crate::error::SitemapError::CapabilityUnavailable(_)
        ));
    }
}
