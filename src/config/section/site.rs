//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://example.com"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::Deserialize;

/// Published site settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every `loc` is joined onto.
    pub url: Option<String>,
}

impl SiteConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be set
    /// - `url` must parse, use http or https, and carry a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = &self.url else {
            diag.error_with_hint(
                Self::URL,
                "site URL is not configured",
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            );
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none_or(str::is_empty) {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}
