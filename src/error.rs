//! Sitemap engine error types.
//!
//! Every variant is fatal at the point of detection. Nothing inside the
//! engine retries or skips; the caller decides what to do.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the sitemap engine.
pub type Result<T> = std::result::Result<T, SitemapError>;

#[derive(Debug, Error)]
pub enum SitemapError {
    /// A required field was not supplied at all.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// A supplied field violates a format, range or enum constraint.
    #[error("invalid {field} `{value}`: {reason}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A configuration value violates protocol limits.
    #[error("invalid configuration: {field} is {value}, {reason}")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// An operation was invoked out of order.
    #[error("{0}")]
    Precondition(&'static str),

    /// A produced artifact exceeds a hard protocol limit.
    #[error("{what}: {actual} exceeds the limit of {limit}")]
    SizeExceeded {
        what: String,
        actual: usize,
        limit: usize,
    },

    /// A required external capability is not compiled in or not reachable.
    #[error("{0} is not available")]
    CapabilityUnavailable(&'static str),

    /// Writing a sitemap or robots file failed.
    #[error("IO error when writing `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

impl SitemapError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
