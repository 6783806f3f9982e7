//! `[sitemap]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sitemap]
//! file_name = "sitemap.xml"               # First chunk; later ones are numbered
//! index_file_name = "sitemap-index.xml"   # Written when there is more than one chunk
//! max_urls = 50000                        # URLs per sitemap (1..=50000)
//! max_sitemaps = 50000                    # Sitemaps per index (1..=50000)
//! gzip = false                            # Write `.gz` files
//! output = "public"                       # Relative to the config file
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::sitemap::{MAX_SITEMAPS_PER_INDEX, MAX_URLS_PER_SITEMAP};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub file_name: String,
    pub index_file_name: String,
    pub max_urls: usize,
    pub max_sitemaps: usize,
    pub gzip: bool,
    /// Destination directory.
    pub output: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            file_name: "sitemap.xml".into(),
            index_file_name: "sitemap-index.xml".into(),
            max_urls: MAX_URLS_PER_SITEMAP,
            max_sitemaps: MAX_SITEMAPS_PER_INDEX,
            gzip: false,
            output: "public".into(),
        }
    }
}

impl SitemapConfig {
    pub const FILE_NAME: FieldPath = FieldPath::new("sitemap.file_name");
    pub const INDEX_FILE_NAME: FieldPath = FieldPath::new("sitemap.index_file_name");
    pub const MAX_URLS: FieldPath = FieldPath::new("sitemap.max_urls");
    pub const MAX_SITEMAPS: FieldPath = FieldPath::new("sitemap.max_sitemaps");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, name) in [
            (Self::FILE_NAME, &self.file_name),
            (Self::INDEX_FILE_NAME, &self.index_file_name),
        ] {
            if name.trim().is_empty() {
                diag.error(field, "file name must not be empty");
            } else if name.contains(['/', '\\']) {
                diag.error_with_hint(
                    field,
                    format!("'{name}' contains a path separator"),
                    "set the directory with `sitemap.output`",
                );
            }
        }

        if self.file_name == self.index_file_name {
            diag.error(
                Self::INDEX_FILE_NAME,
                "index file name must differ from the sitemap file name",
            );
        }

        check_limit(diag, Self::MAX_URLS, self.max_urls, MAX_URLS_PER_SITEMAP);
        check_limit(diag, Self::MAX_SITEMAPS, self.max_sitemaps, MAX_SITEMAPS_PER_INDEX);
    }
}

fn check_limit(diag: &mut ConfigDiagnostics, field: FieldPath, value: usize, limit: usize) {
    if !(1..=limit).contains(&value) {
        diag.error_with_hint(
            field,
            format!("{value} is out of range"),
            format!("use a value between 1 and {limit}"),
        );
    }
}
