//! Configuration management for `sitemap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── sitemap    # [sitemap]
//! │   ├── robots     # [robots]
//! │   └── submit     # [submit]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # Config (this file)
//! ```
//!
//! URL entries may also be listed inline as `[[urls]]` tables.

pub mod section;
pub mod types;
mod util;

pub use section::{RobotsConfig, SiteConfig, SitemapConfig, SubmitConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, find_config_file_from};

use crate::{
    cli::{BuildArgs, Cli},
    debug, log,
    sitemap::{GeneratorConfig, NewUrl},
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "sitemap.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitemap.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Absolute path to the config file, empty when running without one
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,

    #[serde(default)]
    pub robots: RobotsConfig,

    #[serde(default)]
    pub submit: SubmitConfig,

    /// Inline URL entries
    #[serde(default)]
    pub urls: Vec<NewUrl>,
}

impl Config {
    /// Load configuration for a command.
    ///
    /// The config file is searched upward from cwd. Without one, the command
    /// may still run when `--site-url` supplies the only required field.
    pub fn load(cli: &Cli) -> Result<Self> {
        let args = cli.command.args();
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None if args.site_url.is_some() => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
            None => return Err(ConfigError::NotFound(cli.config.clone()).into()),
        };

        config.apply_build_args(args, &cwd);
        config.normalize_paths();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // command options
    // ========================================================================

    /// Apply CLI overrides. `--output` is relative to the cwd.
    fn apply_build_args(&mut self, args: &BuildArgs, cwd: &Path) {
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
        if let Some(ref output) = args.output {
            self.sitemap.output = cwd.join(output);
        }

        Self::update_option(&mut self.sitemap.gzip, args.gzip.as_ref());
        Self::update_option(&mut self.robots.enable, args.robots.as_ref());
        Self::update_option(&mut self.submit.enable, args.submit.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve relative output and robots paths against the root.
    fn normalize_paths(&mut self) {
        self.sitemap.output = self.root.join(&self.sitemap.output);
        self.robots.path = self.root.join(&self.robots.path);
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Directory sitemap files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.sitemap.output
    }

    pub fn robots_path(&self) -> &Path {
        &self.robots.path
    }

    /// Generator settings derived from `[site]` and `[sitemap]`.
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut generator = GeneratorConfig::new(self.site.url.as_deref().unwrap_or_default());
        generator.sitemap_file_name = self.sitemap.file_name.clone();
        generator.sitemap_index_file_name = self.sitemap.index_file_name.clone();
        generator.max_urls_per_sitemap = self.sitemap.max_urls;
        generator.max_sitemaps = self.sitemap.max_sitemaps;
        generator.gzip = self.sitemap.gzip;
        generator
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.sitemap.validate(&mut diag);
        self.submit.validate(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// tests
// ============================================================================
