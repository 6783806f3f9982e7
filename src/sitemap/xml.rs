//! Sitemap XML serialization.
//!
//! Documents are assembled by hand into a single `String`.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <!-- generated-on="2025-01-01T00:00:00+00:00" generator="sitemap-gen/0.1.0" -->
//! <urlset xmlns:xsi="…" xsi:schemaLocation="…" xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//! <url><loc>https://example.com/</loc><lastmod>2025-01-01T00:00:00+00:00</lastmod></url>
//! </urlset>
//! ```

use super::entry::UrlEntry;
use crate::utils::date::DateTime;
use std::borrow::Cow;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const URLSET_SCHEMA: &str = "http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd";
const INDEX_SCHEMA: &str = "http://www.sitemaps.org/schemas/sitemap/0.9/siteindex.xsd";

/// Generator identity recorded in every document.
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Root element of a sitemap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    UrlSet,
    SitemapIndex,
}

impl Root {
    const fn tag(self) -> &'static str {
        match self {
            Self::UrlSet => "urlset",
            Self::SitemapIndex => "sitemapindex",
        }
    }

    const fn schema(self) -> &'static str {
        match self {
            Self::UrlSet => URLSET_SCHEMA,
            Self::SitemapIndex => INDEX_SCHEMA,
        }
    }
}

/// Incremental writer for one document.
pub struct XmlDocument {
    root: Root,
    buf: String,
}

impl XmlDocument {
    /// Open a document: declaration, generation comment and root start tag.
    pub fn open(root: Root, generated_on: DateTime) -> Self {
        let mut buf = String::with_capacity(4096);
        buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        buf.push_str("<!-- generated-on=\"");
        buf.push_str(&generated_on.to_w3c());
        buf.push_str("\" generator=\"");
        buf.push_str(GENERATOR);
        buf.push_str("\" -->\n<");
        buf.push_str(root.tag());
        buf.push_str(" xmlns:xsi=\"");
        buf.push_str(XSI_NS);
        buf.push_str("\" xsi:schemaLocation=\"");
        buf.push_str(SITEMAP_NS);
        buf.push(' ');
        buf.push_str(root.schema());
        buf.push_str("\" xmlns=\"");
        buf.push_str(SITEMAP_NS);
        buf.push_str("\">\n");
        Self { root, buf }
    }

    /// Append a `<url>` element. Children follow the fixed order
    /// `loc, lastmod, changefreq, priority`; absent fields are omitted.
    pub fn push_url(&mut self, base_url: &str, entry: &UrlEntry) {
        debug_assert_eq!(self.root, Root::UrlSet);
        self.buf.push_str("<url><loc>");
        self.buf
            .push_str(&escape_xml(&join_url(base_url, entry.location())));
        self.buf.push_str("</loc>");
        if let Some(lastmod) = entry.last_modified() {
            self.buf.push_str("<lastmod>");
            self.buf.push_str(&lastmod.to_w3c());
            self.buf.push_str("</lastmod>");
        }
        if let Some(freq) = entry.change_frequency() {
            self.buf.push_str("<changefreq>");
            self.buf.push_str(freq.as_str());
            self.buf.push_str("</changefreq>");
        }
        if let Some(priority) = entry.priority() {
            self.buf.push_str("<priority>");
            self.buf.push_str(&priority.to_string());
            self.buf.push_str("</priority>");
        }
        self.buf.push_str("</url>\n");
    }

    /// Append a `<sitemap>` element referencing one sitemap document.
    pub fn push_sitemap(&mut self, loc: &str, lastmod: DateTime) {
        debug_assert_eq!(self.root, Root::SitemapIndex);
        self.buf.push_str("<sitemap><loc>");
        self.buf.push_str(&escape_xml(loc));
        self.buf.push_str("</loc><lastmod>");
        self.buf.push_str(&lastmod.to_w3c());
        self.buf.push_str("</lastmod></sitemap>\n");
    }

    /// Close the root element and return the serialized document.
    pub fn finish(mut self) -> String {
        self.buf.push_str("</");
        self.buf.push_str(self.root.tag());
        self.buf.push_str(">\n");
        self.buf
    }
}

/// Join a base URL (ending in `/`) with a relative location.
///
/// A leading `/` on the location is dropped so the result never contains a
/// doubled separator.
pub fn join_url(base_url: &str, location: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + location.len());
    url.push_str(base_url);
    url.push_str(location.trim_start_matches('/'));
    url
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::entry::NewUrl;

    const BASE: &str = "https://example.com/";

    fn stamp() -> DateTime {
        DateTime::from_ymd(2025, 1, 1)
    }

    fn entry(raw: NewUrl) -> UrlEntry {
        UrlEntry::try_from(raw).unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url(BASE, "/a"), "https://example.com/a");
        assert_eq!(join_url(BASE, "a/b"), "https://example.com/a/b");
        assert_eq!(join_url(BASE, "/"), "https://example.com/");
    }

    #[test]
    fn test_document_header() {
        let xml = XmlDocument::open(Root::UrlSet, stamp()).finish();
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(
            lines[1],
            format!(
                r#"<!-- generated-on="2025-01-01T00:00:00+00:00" generator="{GENERATOR}" -->"#
            )
        );
        assert!(lines[2].starts_with("<urlset "));
        assert!(lines[2].contains(&format!(r#"xmlns="{SITEMAP_NS}""#)));
        assert!(lines[2].contains("sitemap.xsd"));
        assert_eq!(lines[3], "</urlset>");
    }

    #[test]
    fn test_index_root() {
        let mut doc = XmlDocument::open(Root::SitemapIndex, stamp());
        doc.push_sitemap("https://example.com/sitemap1.xml", stamp());
        let xml = doc.finish();

        assert!(xml.contains("<sitemapindex "));
        assert!(xml.contains("siteindex.xsd"));
        assert!(xml.contains(
            "<sitemap><loc>https://example.com/sitemap1.xml</loc><lastmod>2025-01-01T00:00:00+00:00</lastmod></sitemap>"
        ));
        assert!(xml.ends_with("</sitemapindex>\n"));
    }

    #[test]
    fn test_url_minimal() {
        let mut doc = XmlDocument::open(Root::UrlSet, stamp());
        doc.push_url(BASE, &entry(NewUrl::new("/a")));
        let xml = doc.finish();

        assert!(xml.contains("<url><loc>https://example.com/a</loc></url>"));
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<priority>"));
    }

    #[test]
    fn test_url_children_order() {
        let mut doc = XmlDocument::open(Root::UrlSet, stamp());
        doc.push_url(
            BASE,
            &entry(
                NewUrl::new("/b")
                    .priority("0.5")
                    .changefreq("daily")
                    .lastmod("2024-01-15T00:00:00+00:00"),
            ),
        );
        let xml = doc.finish();

        assert!(xml.contains(
            "<url><loc>https://example.com/b</loc><lastmod>2024-01-15T00:00:00+00:00</lastmod><changefreq>daily</changefreq><priority>0.5</priority></url>"
        ));
    }

    #[test]
    fn test_url_partial_fields() {
        let mut doc = XmlDocument::open(Root::UrlSet, stamp());
        doc.push_url(BASE, &entry(NewUrl::new("/c").priority("1")));
        let xml = doc.finish();

        assert!(xml.contains("<url><loc>https://example.com/c</loc><priority>1.0</priority></url>"));
    }

    #[test]
    fn test_url_escapes_special_chars() {
        let mut doc = XmlDocument::open(Root::UrlSet, stamp());
        doc.push_url(BASE, &entry(NewUrl::new("/search?q=a&b=c")));
        let xml = doc.finish();

        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_document_is_well_formed() {
        use quick_xml::Reader;
        use quick_xml::events::Event;

        let mut doc = XmlDocument::open(Root::UrlSet, stamp());
        doc.push_url(BASE, &entry(NewUrl::new("/a?x=<1>&y='2'")));
        doc.push_url(BASE, &entry(NewUrl::new("/b").changefreq("never")));
        let xml = doc.finish();

        let mut reader = Reader::from_str(&xml);
        let mut urls = 0;
        let mut locs = 0;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"url" => urls += 1,
                Event::Start(e) if e.name().as_ref() == b"loc" => locs += 1,
                Event::Eof => break,
                _ => {}
            }
        }

        assert_eq!(urls, 2);
        assert_eq!(locs, 2);
    }
}
