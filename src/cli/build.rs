//! Sitemap building orchestration.
//!
//! Build pipeline phases:
//! - **Collect** - `[[urls]]` from the config, then the `--urls` list
//! - **Build** - Chunk, serialize and index in memory
//! - **Write** - Sitemap files into the output directory
//! - **Robots** - Rewrite `Sitemap:` lines (when enabled)
//! - **Submit** - Ping search engines (when enabled)
//!
//! `check` stops after the build phase.

use crate::{
    cli::{BuildArgs, urls::read_url_list},
    config::Config,
    log,
    output::submit::Submitter,
    sitemap::{BuildSummary, SitemapGenerator},
    utils::plural_count,
};
use anyhow::{Context, Result};
use std::time::Instant;

/// Build, write and publish sitemaps.
pub fn build_sitemaps(config: &Config, args: &BuildArgs) -> Result<BuildSummary> {
    let start = Instant::now();
    let (generator, summary) = build_in_memory(config, args)?;

    let written = generator.write(config.output_dir())?;
    log!("build"; "{} in {}", plural_count(written.len(), "file"), config.output_dir().display());

    if config.robots.enable {
        generator
            .update_robots(config.robots_path())
            .context("Failed to update robots file")?;
    }

    if config.submit.enable {
        let submitter =
            Submitter::with_default_client(config.submit.endpoints.clone(), config.submit.timeout())?;
        for result in generator.submit(&submitter)? {
            if !result.is_success() {
                log!("warning"; "{} rejected the sitemap ({}): {}", result.site, result.status, result.message);
            }
        }
    }

    log!("done"; "{} ({}) in {:.2?}", generator.sitemap_url()?, describe(&summary), start.elapsed());
    Ok(summary)
}

/// Validate everything and build without touching the filesystem.
pub fn check_sitemaps(config: &Config, args: &BuildArgs) -> Result<BuildSummary> {
    let (generator, summary) = build_in_memory(config, args)?;
    log!("done"; "{} would be {}", generator.sitemap_url()?, describe(&summary));
    Ok(summary)
}

fn build_in_memory(config: &Config, args: &BuildArgs) -> Result<(SitemapGenerator, BuildSummary)> {
    let mut generator = SitemapGenerator::new(config.generator_config());
    collect_urls(config, args, &mut generator)?;
    let summary = generator.build()?;
    Ok((generator, summary))
}

/// Add config entries, then the `--urls` list, failing on the first bad one.
pub fn collect_urls(
    config: &Config,
    args: &BuildArgs,
    generator: &mut SitemapGenerator,
) -> Result<usize> {
    for (i, url) in config.urls.iter().enumerate() {
        generator
            .add_url(url.clone())
            .with_context(|| format!("invalid [[urls]] entry #{}", i + 1))?;
    }

    if let Some(path) = &args.urls {
        for line in read_url_list(path)? {
            generator
                .add_url(line.url)
                .with_context(|| format!("invalid URL at {}:{}", path.display(), line.number))?;
        }
    }

    crate::debug!("build"; "collected {}", plural_count(generator.url_count(), "url"));
    Ok(generator.url_count())
}

fn describe(summary: &BuildSummary) -> String {
    let mut text = format!(
        "{}, {}",
        plural_count(summary.urls, "url"),
        plural_count(summary.sitemaps, "sitemap")
    );
    if summary.indexed {
        text.push_str(" + index");
    }
    text
}
