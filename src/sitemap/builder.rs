//! Sitemap generator: URL accumulation, chunking and index assembly.
//!
//! # Pipeline
//!
//! ```text
//! add_url ──► UrlStore ──► build ──► chunk 1..=n (urlset, ≤ max_urls, ≤ 10 MiB)
//!                                └─► index (sitemapindex, only when n > 1)
//! ```
//!
//! The generator is used once per URL set: add every URL, call [`build`],
//! then [`export`] or hand the result to the writer, robots updater and
//! submitter.
//!
//! [`build`]: SitemapGenerator::build
//! [`export`]: SitemapGenerator::export

use super::entry::NewUrl;
use super::store::UrlStore;
use super::xml::{Root, XmlDocument, join_url};
use crate::debug;
use crate::error::{Result, SitemapError};
use crate::output::{robots, submit::PingResult, submit::Submitter, writer};
use crate::utils::date::DateTime;
use crate::utils::plural_count;
use std::path::{Path, PathBuf};

/// Protocol limit on `<url>` entries per sitemap document.
pub const MAX_URLS_PER_SITEMAP: usize = 50_000;

/// Protocol limit on sitemaps referenced by one index.
pub const MAX_SITEMAPS_PER_INDEX: usize = 50_000;

/// Protocol limit on the uncompressed size of one sitemap document.
pub const MAX_SITEMAP_BYTES: usize = 10 * 1024 * 1024;

/// Suffix appended to file names when gzip output is enabled.
pub const GZIP_SUFFIX: &str = ".gz";

// ============================================================================
// Configuration
// ============================================================================

/// Settings consumed by [`SitemapGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    base_url: String,
    pub sitemap_file_name: String,
    pub sitemap_index_file_name: String,
    pub max_urls_per_sitemap: usize,
    pub max_sitemaps: usize,
    pub gzip: bool,
}

impl GeneratorConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            sitemap_file_name: "sitemap.xml".into(),
            sitemap_index_file_name: "sitemap-index.xml".into(),
            max_urls_per_sitemap: MAX_URLS_PER_SITEMAP,
            max_sitemaps: MAX_SITEMAPS_PER_INDEX,
            gzip: false,
        }
    }

    /// Base URL, always ending with exactly one `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public name of a file, with the gzip suffix when compression is on.
    pub fn public_name(&self, name: &str) -> String {
        if self.gzip {
            format!("{name}{GZIP_SUFFIX}")
        } else {
            name.to_string()
        }
    }

    fn validate(&self) -> Result<()> {
        check_limit("max_urls_per_sitemap", self.max_urls_per_sitemap, MAX_URLS_PER_SITEMAP)?;
        check_limit("max_sitemaps", self.max_sitemaps, MAX_SITEMAPS_PER_INDEX)
    }
}

fn check_limit(field: &'static str, value: usize, limit: usize) -> Result<()> {
    if (1..=limit).contains(&value) {
        Ok(())
    } else {
        Err(SitemapError::InvalidConfiguration {
            field,
            value: value.to_string(),
            reason: format!("must be within 1..={limit}"),
        })
    }
}

/// Strip trailing separators and append exactly one.
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

/// Insert a 1-based chunk number before the `.xml` extension.
///
/// `sitemap.xml` → `sitemap2.xml`; names without `.xml` get the number
/// appended.
pub fn numbered_file_name(name: &str, number: usize) -> String {
    match name.strip_suffix(".xml") {
        Some(stem) => format!("{stem}{number}.xml"),
        None => format!("{name}{number}"),
    }
}

// ============================================================================
// Build output
// ============================================================================

/// One fully serialized XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    name: String,
    xml: String,
    urls: usize,
}

impl SitemapDocument {
    /// File name without any gzip suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Number of `<url>` (or `<sitemap>`) entries described.
    pub fn entries(&self) -> usize {
        self.urls
    }

    pub fn byte_len(&self) -> usize {
        self.xml.len()
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct Sitemaps {
    index: Option<SitemapDocument>,
    documents: Vec<SitemapDocument>,
    sitemap_url: String,
    plain_sitemap_url: Option<String>,
}

impl Sitemaps {
    /// The index document, present only when more than one sitemap exists.
    pub fn index(&self) -> Option<&SitemapDocument> {
        self.index.as_ref()
    }

    /// Sitemap documents in chunk order.
    pub fn documents(&self) -> &[SitemapDocument] {
        &self.documents
    }

    /// Index first (if any), then sitemaps in chunk order.
    pub fn all(&self) -> impl Iterator<Item = &SitemapDocument> {
        self.index.iter().chain(&self.documents)
    }

    /// Canonical URL to advertise: the index, or the single sitemap.
    pub fn sitemap_url(&self) -> &str {
        &self.sitemap_url
    }

    /// URL of the uncompressed single sitemap, set only when gzip is on and
    /// no index exists.
    pub fn plain_sitemap_url(&self) -> Option<&str> {
        self.plain_sitemap_url.as_deref()
    }
}

/// Counters reported after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub sitemaps: usize,
    pub urls: usize,
    pub indexed: bool,
    pub bytes: usize,
}

// ============================================================================
// Generator
// ============================================================================

#[derive(Debug)]
pub struct SitemapGenerator {
    config: GeneratorConfig,
    store: UrlStore,
    byte_limit: usize,
    output: Option<Sitemaps>,
}

impl SitemapGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            store: UrlStore::new(),
            byte_limit: MAX_SITEMAP_BYTES,
            output: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn store(&self) -> &UrlStore {
        &self.store
    }

    /// Validate and add one URL, returning its position.
    pub fn add_url(&mut self, url: NewUrl) -> Result<usize> {
        self.store.append(url)
    }

    /// Add URLs in order, stopping at the first invalid one.
    ///
    /// URLs added before the failure stay in the store.
    pub fn add_urls<I>(&mut self, urls: I) -> Result<usize>
    where
        I: IntoIterator<Item = NewUrl>,
    {
        let mut added = 0;
        for url in urls {
            self.store.append(url)?;
            added += 1;
        }
        Ok(added)
    }

    /// Number of URLs added so far.
    pub fn url_count(&self) -> usize {
        self.store.len()
    }

    /// Build with the current time as generation timestamp.
    pub fn build(&mut self) -> Result<BuildSummary> {
        self.build_at(DateTime::now_utc())
    }

    /// Build all documents, stamping them with `generated_on`.
    ///
    /// Building again replaces the previous output.
    pub fn build_at(&mut self, generated_on: DateTime) -> Result<BuildSummary> {
        if self.store.is_empty() {
            return Err(SitemapError::Precondition("no URLs added"));
        }
        self.config.validate()?;

        let total = self.store.len();
        let per_chunk = self.config.max_urls_per_sitemap;
        let chunks = total.div_ceil(per_chunk);

        let mut documents = Vec::with_capacity(chunks);
        for c in 0..chunks {
            let name = if chunks > 1 {
                numbered_file_name(&self.config.sitemap_file_name, c + 1)
            } else {
                self.config.sitemap_file_name.clone()
            };

            let entries = self.store.chunk(c, per_chunk);
            let mut doc = XmlDocument::open(Root::UrlSet, generated_on);
            for entry in entries {
                doc.push_url(self.config.base_url(), entry);
            }
            let xml = doc.finish();

            if xml.len() > self.byte_limit {
                return Err(SitemapError::SizeExceeded {
                    what: format!("sitemap `{name}` size in bytes"),
                    actual: xml.len(),
                    limit: self.byte_limit,
                });
            }

            debug!("sitemap"; "{} ({}, {} bytes)", name, plural_count(entries.len(), "url"), xml.len());
            documents.push(SitemapDocument {
                name,
                xml,
                urls: entries.len(),
            });
        }

        if documents.len() > self.config.max_sitemaps {
            return Err(SitemapError::SizeExceeded {
                what: "too many sitemaps for one index".into(),
                actual: documents.len(),
                limit: self.config.max_sitemaps,
            });
        }

        let base_url = self.config.base_url();
        let output = if documents.len() > 1 {
            let mut index = XmlDocument::open(Root::SitemapIndex, generated_on);
            for doc in &documents {
                index.push_sitemap(
                    &join_url(base_url, &self.config.public_name(doc.name())),
                    generated_on,
                );
            }
            let index = SitemapDocument {
                name: self.config.sitemap_index_file_name.clone(),
                xml: index.finish(),
                urls: documents.len(),
            };
            debug!("sitemap"; "{} ({})", index.name, plural_count(index.urls, "sitemap"));

            Sitemaps {
                sitemap_url: join_url(base_url, &self.config.public_name(index.name())),
                plain_sitemap_url: None,
                index: Some(index),
                documents,
            }
        } else {
            let name = documents[0].name();
            Sitemaps {
                sitemap_url: join_url(base_url, &self.config.public_name(name)),
                plain_sitemap_url: self.config.gzip.then(|| join_url(base_url, name)),
                index: None,
                documents,
            }
        };

        let summary = BuildSummary {
            sitemaps: output.documents.len(),
            urls: total,
            indexed: output.index.is_some(),
            bytes: output.all().map(SitemapDocument::byte_len).sum(),
        };
        self.output = Some(output);
        Ok(summary)
    }

    /// Build output, or an error when [`build`](Self::build) has not run.
    pub fn sitemaps(&self) -> Result<&Sitemaps> {
        self.output
            .as_ref()
            .ok_or(SitemapError::Precondition("sitemap has not been built yet"))
    }

    /// `(public file name, xml)` pairs: index first, then sitemaps in chunk
    /// order.
    pub fn export(&self) -> Result<Vec<(String, &str)>> {
        Ok(self
            .sitemaps()?
            .all()
            .map(|doc| (self.config.public_name(doc.name()), doc.xml()))
            .collect())
    }

    /// Canonical externally-visible sitemap URL.
    pub fn sitemap_url(&self) -> Result<&str> {
        Ok(self.sitemaps()?.sitemap_url())
    }

    /// Write every document into `dir`, gzip-compressed when configured.
    ///
    /// With gzip on and a single sitemap, the uncompressed file is written as
    /// well so both advertised URLs resolve.
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let output = self.sitemaps()?;
        let gzip = self.config.gzip;

        let mut written = Vec::new();
        for doc in output.all() {
            written.push(writer::write_file(dir, doc.name(), doc.xml().as_bytes(), gzip)?);
        }
        if output.plain_sitemap_url().is_some() {
            let doc = &output.documents()[0];
            written.push(writer::write_file(dir, doc.name(), doc.xml().as_bytes(), false)?);
        }
        Ok(written)
    }

    /// Replace the `Sitemap:` directives of a robots file with this build's.
    pub fn update_robots(&self, path: &Path) -> Result<()> {
        let output = self.sitemaps()?;
        let mut urls = vec![output.sitemap_url()];
        urls.extend(output.plain_sitemap_url());
        robots::update_robots(path, &urls)
    }

    /// Ping every configured search engine with the canonical URL.
    pub fn submit(&self, submitter: &Submitter) -> Result<Vec<PingResult>> {
        Ok(submitter.submit(self.sitemap_url()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> DateTime {
        DateTime::new(2025, 3, 1, 12, 0, 0)
    }

    fn generator(max_urls: usize) -> SitemapGenerator {
        let mut config = GeneratorConfig::new("https://example.com");
        config.max_urls_per_sitemap = max_urls;
        SitemapGenerator::new(config)
    }

    fn with_urls(max_urls: usize, n: usize) -> SitemapGenerator {
        let mut generator = generator(max_urls);
        generator
            .add_urls((0..n).map(|i| NewUrl::new(format!("/page/{i}"))))
            .unwrap();
        generator
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://example.com"), "https://example.com/");
        assert_eq!(normalize_base_url("https://example.com/"), "https://example.com/");
        assert_eq!(normalize_base_url("https://example.com///"), "https://example.com/");
        assert_eq!(
            normalize_base_url("https://example.com/blog"),
            "https://example.com/blog/"
        );
    }

    #[test]
    fn test_numbered_file_name() {
        assert_eq!(numbered_file_name("sitemap.xml", 1), "sitemap1.xml");
        assert_eq!(numbered_file_name("sitemap.xml", 12), "sitemap12.xml");
        assert_eq!(numbered_file_name("map.v2.xml", 3), "map.v23.xml");
        assert_eq!(numbered_file_name("sitemap", 2), "sitemap2");
    }

    #[test]
    fn test_build_without_urls() {
        let mut generator = generator(50_000);
        let err = generator.build_at(stamp()).unwrap_err();
        assert!(matches!(err, SitemapError::Precondition("no URLs added")));
    }

    #[test]
    fn test_build_rejects_oversized_chunk_limit() {
        let mut generator = with_urls(50_001, 1);
        let err = generator.build_at(stamp()).unwrap_err();
        assert!(matches!(
            err,
            SitemapError::InvalidConfiguration {
                field: "max_urls_per_sitemap",
                ..
            }
        ));

        let mut generator = with_urls(0, 1);
        assert!(generator.build_at(stamp()).is_err());
    }

    #[test]
    fn test_export_before_build() {
        let generator = with_urls(10, 1);
        assert!(matches!(
            generator.export().unwrap_err(),
            SitemapError::Precondition(_)
        ));
        assert!(generator.sitemap_url().is_err());
        assert!(generator.write(Path::new("unused")).is_err());
    }

    #[test]
    fn test_single_sitemap_round_trip() {
        let mut generator = generator(50_000);
        generator.add_url(NewUrl::new("/a")).unwrap();
        generator
            .add_url(
                NewUrl::new("/b")
                    .lastmod("2024-01-15T00:00:00+00:00")
                    .changefreq("daily")
                    .priority("0.5"),
            )
            .unwrap();

        let summary = generator.build_at(stamp()).unwrap();
        assert_eq!(summary.sitemaps, 1);
        assert_eq!(summary.urls, 2);
        assert!(!summary.indexed);

        let exported = generator.export().unwrap();
        assert_eq!(exported.len(), 1);
        let (name, xml) = &exported[0];
        assert_eq!(name, "sitemap.xml");
        assert!(xml.contains("<url><loc>https://example.com/a</loc></url>"));
        assert!(xml.contains(
            "<url><loc>https://example.com/b</loc><lastmod>2024-01-15T00:00:00+00:00</lastmod><changefreq>daily</changefreq><priority>0.5</priority></url>"
        ));
        assert_eq!(
            generator.sitemap_url().unwrap(),
            "https://example.com/sitemap.xml"
        );
        assert!(generator.sitemaps().unwrap().index().is_none());
    }

    #[test]
    fn test_chunk_count_and_sizes() {
        for (n, m) in [(1, 1), (5, 2), (6, 2), (7, 3), (10, 10), (11, 10)] {
            let mut generator = with_urls(m, n);
            let summary = generator.build_at(stamp()).unwrap();
            assert_eq!(summary.sitemaps, n.div_ceil(m), "n={n} m={m}");

            let output = generator.sitemaps().unwrap();
            assert!(output.documents().iter().all(|d| d.entries() <= m));
            assert_eq!(
                output.documents().iter().map(SitemapDocument::entries).sum::<usize>(),
                n
            );
            assert_eq!(output.index().is_some(), summary.sitemaps > 1);
        }
    }

    #[test]
    fn test_every_location_appears_once() {
        let mut generator = with_urls(3, 10);
        generator.build_at(stamp()).unwrap();
        let output = generator.sitemaps().unwrap();

        for i in 0..10 {
            let loc = format!("<loc>https://example.com/page/{i}</loc>");
            let hits: usize = output
                .documents()
                .iter()
                .map(|d| d.xml().matches(&loc).count())
                .sum();
            assert_eq!(hits, 1, "{loc}");
        }
    }

    #[test]
    fn test_index_for_multiple_chunks() {
        let mut generator = with_urls(2, 5);
        let summary = generator.build_at(stamp()).unwrap();
        assert!(summary.indexed);

        let exported = generator.export().unwrap();
        let names: Vec<&str> = exported.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            ["sitemap-index.xml", "sitemap1.xml", "sitemap2.xml", "sitemap3.xml"]
        );

        let index = exported[0].1;
        assert!(index.contains("<sitemapindex "));
        for n in 1..=3 {
            assert!(index.contains(&format!(
                "<sitemap><loc>https://example.com/sitemap{n}.xml</loc><lastmod>2025-03-01T12:00:00+00:00</lastmod></sitemap>"
            )));
        }
        assert_eq!(
            generator.sitemap_url().unwrap(),
            "https://example.com/sitemap-index.xml"
        );
    }

    #[test]
    fn test_large_build_splits_into_three() {
        let mut generator = with_urls(50_000, 100_001);
        let summary = generator.build_at(stamp()).unwrap();
        assert_eq!(summary.sitemaps, 3);

        let output = generator.sitemaps().unwrap();
        let sizes: Vec<usize> = output.documents().iter().map(SitemapDocument::entries).collect();
        assert_eq!(sizes, [50_000, 50_000, 1]);

        let index = output.index().unwrap().xml();
        assert!(index.contains("https://example.com/sitemap1.xml"));
        assert!(index.contains("https://example.com/sitemap2.xml"));
        assert!(index.contains("https://example.com/sitemap3.xml"));
    }

    #[test]
    fn test_too_many_sitemaps() {
        let mut generator = with_urls(1, 4);
        generator.config.max_sitemaps = 3;
        let err = generator.build_at(stamp()).unwrap_err();
        assert!(matches!(
            err,
            SitemapError::SizeExceeded {
                actual: 4,
                limit: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_chunk_over_byte_limit() {
        let mut generator = with_urls(50_000, 20);
        generator.byte_limit = 512;
        let err = generator.build_at(stamp()).unwrap_err();
        match err {
            SitemapError::SizeExceeded { actual, limit, .. } => {
                assert!(actual > 512);
                assert_eq!(limit, 512);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_gzip_changes_names_not_content() {
        let build = |gzip: bool| {
            let mut generator = with_urls(2, 3);
            generator.config.gzip = gzip;
            generator.build_at(stamp()).unwrap();
            generator
        };
        let plain = build(false);
        let gzipped = build(true);

        let plain_docs: Vec<&str> = plain.sitemaps().unwrap().all().map(|d| d.xml()).collect();
        let gz_docs: Vec<&str> = gzipped.sitemaps().unwrap().all().map(|d| d.xml()).collect();
        assert_eq!(plain_docs.len(), gz_docs.len());
        // The index lists `.gz` locations; the url sets are byte-identical
        assert_eq!(plain_docs[1..], gz_docs[1..]);

        let names: Vec<String> = gzipped.export().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            ["sitemap-index.xml.gz", "sitemap1.xml.gz", "sitemap2.xml.gz"]
        );
        assert!(gz_docs[0].contains("<loc>https://example.com/sitemap1.xml.gz</loc>"));
        assert_eq!(
            gzipped.sitemap_url().unwrap(),
            "https://example.com/sitemap-index.xml.gz"
        );
    }

    #[test]
    fn test_gzip_single_sitemap_urls() {
        let mut generator = with_urls(10, 2);
        generator.config.gzip = true;
        generator.build_at(stamp()).unwrap();
        let output = generator.sitemaps().unwrap();

        assert_eq!(output.sitemap_url(), "https://example.com/sitemap.xml.gz");
        assert_eq!(
            output.plain_sitemap_url(),
            Some("https://example.com/sitemap.xml")
        );
    }

    #[test]
    fn test_url_count_tracks_successful_adds() {
        let mut generator = generator(10);
        generator.add_url(NewUrl::new("/a")).unwrap();
        assert!(generator.add_url(NewUrl::new("/b").changefreq("sometimes")).is_err());
        generator.add_url(NewUrl::new("/c")).unwrap();
        assert_eq!(generator.url_count(), 2);
        assert!(generator.store().capacity() >= 2);
    }

    #[test]
    fn test_add_urls_stops_at_first_error() {
        let mut generator = generator(10);
        let err = generator
            .add_urls([
                NewUrl::new("/a"),
                NewUrl::new("/b").priority("7"),
                NewUrl::new("/c"),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            SitemapError::InvalidArgument {
                field: "priority",
                ..
            }
        ));
        assert_eq!(generator.url_count(), 1);
    }

    #[test]
    fn test_base_url_with_path() {
        let mut generator = SitemapGenerator::new(GeneratorConfig::new("https://example.com/docs/"));
        generator.add_url(NewUrl::new("intro")).unwrap();
        generator.build_at(stamp()).unwrap();
        let exported = generator.export().unwrap();
        assert!(exported[0].1.contains("<loc>https://example.com/docs/intro</loc>"));
        assert_eq!(
            generator.sitemap_url().unwrap(),
            "https://example.com/docs/sitemap.xml"
        );
    }

    #[test]
    fn test_write_gzip_single_sitemap() {
        use flate2::read::GzDecoder;
        use std::io::Read;

        let dir = tempfile::TempDir::new().unwrap();
        let mut generator = with_urls(10, 2);
        generator.config.gzip = true;
        generator.build_at(stamp()).unwrap();

        let written = generator.write(dir.path()).unwrap();
        assert_eq!(
            written,
            [dir.path().join("sitemap.xml.gz"), dir.path().join("sitemap.xml")]
        );

        let mut decoded = String::new();
        GzDecoder::new(std::fs::File::open(&written[0]).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, std::fs::read_to_string(&written[1]).unwrap());

        let robots = dir.path().join("robots.txt");
        generator.update_robots(&robots).unwrap();
        let content = std::fs::read_to_string(&robots).unwrap();
        assert!(content.ends_with(
            "Sitemap: https://example.com/sitemap.xml.gz\nSitemap: https://example.com/sitemap.xml\n"
        ));
    }

    #[test]
    fn test_submit_uses_canonical_url() {
        use crate::output::submit::{BoxError, HttpGet, HttpResponse};

        struct Echo;
        impl HttpGet for Echo {
            fn get(&self, url: &str) -> std::result::Result<HttpResponse, BoxError> {
                Ok(HttpResponse {
                    status: 200,
                    body: url.to_string(),
                })
            }
        }

        let mut generator = with_urls(2, 3);
        let submitter = Submitter::new(
            Box::new(Echo),
            vec!["https://search.example.org/ping?sitemap=".into()],
        );
        assert!(generator.submit(&submitter).is_err());

        generator.build_at(stamp()).unwrap();
        let results = generator.submit(&submitter).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].request_url,
            "https://search.example.org/ping?sitemap=https%3A%2F%2Fexample.com%2Fsitemap-index.xml"
        );
        assert_eq!(results[0].site, "example");
    }

    #[test]
    fn test_chunk_at_exact_byte_limit() {
        let mut generator = with_urls(50_000, 20);
        generator.build_at(stamp()).unwrap();
        let size = generator.sitemaps().unwrap().documents()[0].byte_len();

        generator.byte_limit = size;
        assert!(generator.build_at(stamp()).is_ok());

        generator.byte_limit = size - 1;
        let err = generator.build_at(stamp()).unwrap_err();
        assert!(matches!(
            err,
            SitemapError::SizeExceeded { actual, limit, .. } if actual == size && limit == size - 1
        ));
    }
}
