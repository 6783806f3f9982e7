//! XML sitemap generation following the sitemaps.org protocol.
//!
//! URLs are validated as they are added, then split into sitemaps of at most
//! `max_urls_per_sitemap` entries and 10 MiB each. More than one sitemap
//! produces a sitemap index. Output can be gzip-compressed, advertised in
//! `robots.txt` and pinged to search engines.
//!
//! ```no_run
//! use sitemap_gen::{GeneratorConfig, NewUrl, SitemapGenerator};
//!
//! # fn main() -> sitemap_gen::Result<()> {
//! let mut generator = SitemapGenerator::new(GeneratorConfig::new("https://example.com"));
//! generator.add_url(NewUrl::new("/").changefreq("daily").priority("1.0"))?;
//! generator.add_url(NewUrl::new("/about").lastmod("2024-01-15"))?;
//! generator.build()?;
//! generator.write("public".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod output;
pub mod sitemap;
pub mod utils;

pub use error::{Result, SitemapError};
pub use sitemap::{
    BuildSummary, ChangeFreq, GeneratorConfig, NewUrl, Priority, SitemapGenerator, UrlEntry,
};
