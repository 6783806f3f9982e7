//! `robots.txt` sitemap directives.
//!
//! Existing `Sitemap:` lines are dropped and fresh ones appended; every other
//! line is kept as-is. A missing file is seeded with a permissive default.

use crate::error::{Result, SitemapError};
use crate::log;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Body written when no robots file exists yet.
pub const DEFAULT_ROBOTS: &str = "User-agent: *\nAllow: /";

const DIRECTIVE: &str = "Sitemap:";

/// Rewrite (or create) the robots file at `path` to advertise `sitemap_urls`.
pub fn update_robots(path: &Path, sitemap_urls: &[&str]) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(SitemapError::Io(path.to_path_buf(), e)),
    };

    let content = render_robots(existing.as_deref(), sitemap_urls);
    fs::write(path, content).map_err(|e| SitemapError::Io(path.to_path_buf(), e))?;

    log!("robots"; "{}", path.display());
    Ok(())
}

/// Produce the new robots body from the current one (if any).
pub fn render_robots(existing: Option<&str>, sitemap_urls: &[&str]) -> String {
    let body = existing.unwrap_or(DEFAULT_ROBOTS);

    let mut kept: Vec<&str> = body
        .lines()
        .filter(|line| !line.starts_with(DIRECTIVE))
        .collect();
    while kept.last().is_some_and(|line| line.trim().is_empty()) {
        kept.pop();
    }

    let mut out = String::with_capacity(body.len() + 64);
    for line in kept {
        out.push_str(line);
        out.push('\n');
    }
    for url in sitemap_urls {
        out.push_str(DIRECTIVE);
        out.push(' ');
        out.push_str(url);
        out.push('\n');
    }
    out
}
