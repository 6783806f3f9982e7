//! Sitemap engine.
//!
//! - [`entry`]: URL entries and validation
//! - [`store`]: ordered, append-only URL store
//! - [`xml`]: document serialization
//! - [`builder`]: chunking, index assembly and the public generator

pub mod builder;
pub mod entry;
pub mod store;
pub mod xml;

pub use builder::{
    BuildSummary, GZIP_SUFFIX, GeneratorConfig, MAX_SITEMAP_BYTES, MAX_SITEMAPS_PER_INDEX,
    MAX_URLS_PER_SITEMAP, SitemapDocument, SitemapGenerator, Sitemaps,
};
pub use entry::{ChangeFreq, NewUrl, Priority, UrlEntry};
pub use store::UrlStore;
