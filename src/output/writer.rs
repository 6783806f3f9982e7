//! Sitemap file writer.

use crate::error::{Result, SitemapError};
use crate::log;
use crate::sitemap::GZIP_SUFFIX;
use flate2::{Compression, write::GzEncoder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `content` to `dir/name`, or gzip it into `dir/name.gz`.
///
/// The directory is created when missing. Returns the written path.
pub fn write_file(dir: &Path, name: &str, content: &[u8], compress: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| SitemapError::Io(dir.to_path_buf(), e))?;

    let path = if compress {
        dir.join(format!("{name}{GZIP_SUFFIX}"))
    } else {
        dir.join(name)
    };

    let bytes = if compress {
        gzip(content).map_err(|e| SitemapError::Io(path.clone(), e))?
    } else {
        content.to_vec()
    };

    fs::write(&path, &bytes).map_err(|e| SitemapError::Io(path.clone(), e))?;

    log!("write"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(path)
}

/// Encode bytes as a standard gzip stream.
pub fn gzip(content: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(content.len() / 4), Compression::default());
    encoder.write_all(content)?;
    encoder.finish()
}
