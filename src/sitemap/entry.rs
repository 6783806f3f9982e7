//! URL entries and their insertion-time validation.
//!
//! Raw input arrives as a [`NewUrl`] (every field optional, text-typed, as it
//! comes from a config file or a URL list). [`UrlEntry::try_from`] turns it
//! into a validated entry or reports the first rule it breaks.

use crate::error::{Result, SitemapError};
use crate::utils::date::DateTime;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Longest accepted location, in characters (not bytes).
pub const MAX_LOCATION_CHARS: usize = 2048;

// ============================================================================
// Change frequency
// ============================================================================

/// Expected update cadence of a page (`<changefreq>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const ALL: [Self; 7] = [
        Self::Always,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Never,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl FromStr for ChangeFreq {
    type Err = SitemapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str() == s)
            .ok_or_else(|| {
                SitemapError::invalid(
                    "changefreq",
                    s,
                    "must be one of always, hourly, daily, weekly, monthly, yearly, never",
                )
            })
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Priority
// ============================================================================

/// Relative importance of a page within its site, in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f64);

impl Priority {
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            // `-0.0` would print with its sign
            Ok(Self(value + 0.0))
        } else {
            Err(SitemapError::invalid(
                "priority",
                value.to_string(),
                "must be within 0.0..=1.0",
            ))
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Priority {
    type Err = SitemapError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| SitemapError::invalid("priority", s, "not a number"))?;
        // NaN fails the range check in `new`
        Self::new(value)
            .map_err(|_| SitemapError::invalid("priority", s, "must be within 0.0..=1.0"))
    }
}

impl fmt::Display for Priority {
    /// Always shows a fractional part: `1` renders as `1.0`, `0.25` as `0.25`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        if text.contains('.') {
            f.write_str(&text)
        } else {
            write!(f, "{text}.0")
        }
    }
}

// ============================================================================
// Raw input
// ============================================================================

/// Unvalidated URL entry as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewUrl {
    pub loc: Option<String>,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    #[serde(deserialize_with = "priority_text")]
    pub priority: Option<String>,
}

impl NewUrl {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: Some(loc.into()),
            ..Self::default()
        }
    }

    pub fn lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = Some(lastmod.into());
        self
    }

    pub fn changefreq(mut self, changefreq: impl Into<String>) -> Self {
        self.changefreq = Some(changefreq.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Accept `priority = 0.5` as well as `priority = "0.5"` in TOML.
fn priority_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Float(f64),
        Int(i64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Float(v) => v.to_string(),
        Raw::Int(v) => v.to_string(),
        Raw::Text(v) => v,
    }))
}

// ============================================================================
// Validated entry
// ============================================================================

/// One page listed in a sitemap.
///
/// Optional fields that were never supplied stay `None` and are omitted from
/// the `<url>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    location: String,
    last_modified: Option<DateTime>,
    change_frequency: Option<ChangeFreq>,
    priority: Option<Priority>,
}

impl UrlEntry {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn last_modified(&self) -> Option<DateTime> {
        self.last_modified
    }

    pub fn change_frequency(&self) -> Option<ChangeFreq> {
        self.change_frequency
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

}

impl TryFrom<NewUrl> for UrlEntry {
    type Error = SitemapError;

    fn try_from(raw: NewUrl) -> Result<Self> {
        let location = raw.loc.ok_or(SitemapError::MissingArgument("loc"))?;
        if location.is_empty() {
            return Err(SitemapError::invalid("loc", location, "must not be empty"));
        }
        let chars = location.chars().count();
        if chars > MAX_LOCATION_CHARS {
            return Err(SitemapError::invalid(
                "loc",
                truncate_for_display(&location),
                format!("{chars} characters, the limit is {MAX_LOCATION_CHARS}"),
            ));
        }
        if location.chars().any(char::is_control) {
            return Err(SitemapError::invalid(
                "loc",
                truncate_for_display(&location.escape_debug().to_string()),
                "control characters are not allowed",
            ));
        }
        if url::Url::parse(&location).is_ok() {
            return Err(SitemapError::invalid(
                "loc",
                truncate_for_display(&location),
                "must be a path relative to the site URL",
            ));
        }

        let last_modified = raw
            .lastmod
            .map(|text| {
                DateTime::parse(&text).ok_or_else(|| {
                    SitemapError::invalid(
                        "lastmod",
                        text,
                        "expected YYYY-MM-DD or YYYY-MM-DDThh:mm:ss with Z or ±hh:mm",
                    )
                })
            })
            .transpose()?;

        let change_frequency = raw.changefreq.as_deref().map(str::parse).transpose()?;
        let priority = raw.priority.as_deref().map(str::parse).transpose()?;

        Ok(Self {
            location,
            last_modified,
            change_frequency,
            priority,
        })
    }
}

/// Keep error messages readable for multi-kilobyte locations.
fn truncate_for_display(s: &str) -> String {
    const SHOWN: usize = 64;
    match s.char_indices().nth(SHOWN) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
