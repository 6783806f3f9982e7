//! `[robots]` section configuration.
//!
//! ```toml
//! [robots]
//! enable = true
//! path = "public/robots.txt"   # Relative to the config file
//! ```

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Rewrite `Sitemap:` lines after each build.
    pub enable: bool,
    pub path: PathBuf,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            path: "robots.txt".into(),
        }
    }
}
