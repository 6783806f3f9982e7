//! Plain-text URL lists.
//!
//! ```text
//! # loc            lastmod      changefreq  priority
//! /                2024-01-15   daily       1.0
//! /about           -            monthly
//! /blog/post-1     2024-01-10T08:00:00Z
//! ```

use crate::sitemap::NewUrl;
use anyhow::{Context, Result, bail};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

const MAX_COLUMNS: usize = 4;

/// One parsed entry with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlLine {
    pub number: usize,
    pub url: NewUrl,
}

/// Read a URL list from `path`, or from stdin when it is `-`.
pub fn read_url_list(path: &Path) -> Result<Vec<UrlLine>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read URL list from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list `{}`", path.display()))?
    };

    parse_url_list(&content).with_context(|| format!("in `{}`", path.display()))
}

/// Parse whitespace-separated `loc [lastmod] [changefreq] [priority]` lines.
pub fn parse_url_list(content: &str) -> Result<Vec<UrlLine>> {
    let mut lines = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let number = index + 1;
        let line = strip_comment(line);
        let columns: Vec<&str> = line.split_whitespace().collect();

        if columns.is_empty() {
            continue;
        }
        if columns.len() > MAX_COLUMNS {
            bail!(
                "line {number}: expected at most {MAX_COLUMNS} columns, found {}",
                columns.len()
            );
        }
        if columns[0] == "-" {
            bail!("line {number}: loc is required");
        }

        let column = |i: usize| {
            columns
                .get(i)
                .filter(|value| **value != "-")
                .map(|value| value.to_string())
        };

        lines.push(UrlLine {
            number,
            url: NewUrl {
                loc: column(0),
                lastmod: column(1),
                changefreq: column(2),
                priority: column(3),
            },
        });
    }

    Ok(lines)
}

/// Cut a `#` comment that starts the line or follows whitespace, so
/// fragments such as `/page#intro` stay intact.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let start = bytes
        .iter()
        .enumerate()
        .position(|(i, &b)| b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()));
    start.map_or(line, |i| &line[..i])
}
