//! `[submit]` section configuration.
//!
//! ```toml
//! [submit]
//! enable = true
//! timeout = 30
//! endpoints = ["https://www.bing.com/ping?sitemap="]
//! ```
//!
//! Each endpoint is a prefix the encoded sitemap URL is appended to.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::output::submit::{DEFAULT_ENDPOINTS, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub enable: bool,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub endpoints: Vec<String>,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            enable: false,
            timeout: DEFAULT_TIMEOUT,
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SubmitConfig {
    pub const TIMEOUT: FieldPath = FieldPath::new("submit.timeout");
    pub const ENDPOINTS: FieldPath = FieldPath::new("submit.endpoints");

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "timeout must be at least 1 second");
        }

        for endpoint in &self.endpoints {
            match url::Url::parse(endpoint) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => diag.error_with_hint(
                    Self::ENDPOINTS,
                    format!("'{endpoint}' is not an http(s) URL"),
                    "use format like https://www.bing.com/ping?sitemap=",
                ),
            }
        }

        if self.enable && self.endpoints.is_empty() {
            diag.warn(Self::ENDPOINTS, "submit is enabled but no endpoints are configured");
        }
    }
}
