//! Collaborators that move built sitemaps out of memory.
//!
//! - **writer**: plain or gzip files on disk
//! - **robots**: `Sitemap:` directives in `robots.txt`
//! - **submit**: search engine ping endpoints over HTTP

pub mod robots;
pub mod submit;
pub mod writer;
