//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// sitemaps.org XML sitemap generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "sitemap.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build sitemaps and write them to the output directory
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Validate config and URLs and build in memory without writing anything
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: BuildArgs,
    },
}

impl Commands {
    pub fn args(&self) -> &BuildArgs {
        match self {
            Self::Build { args } | Self::Check { args } => args,
        }
    }
}

/// Shared arguments for Build and Check commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Override the site URL from the config.
    ///
    /// With this flag no config file is required.
    #[arg(long, value_name = "URL")]
    pub site_url: Option<String>,

    /// Read URL entries from a file (`-` for stdin).
    ///
    /// One entry per line: `loc [lastmod] [changefreq] [priority]`.
    /// Use `-` to skip a column; `#` starts a comment.
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub urls: Option<PathBuf>,

    /// Output directory path (relative to the current directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Write gzip-compressed sitemaps
    #[arg(short = 'z', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub gzip: Option<bool>,

    /// Update `Sitemap:` lines in robots.txt
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub robots: Option<bool>,

    /// Ping search engines with the sitemap URL
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub submit: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_flags() {
        let cli = Cli::parse_from([
            "sitemap-gen",
            "build",
            "--urls",
            "urls.txt",
            "-z",
            "--robots=false",
        ]);
        let args = cli.command.args();

        assert_eq!(cli.config, PathBuf::from("sitemap.toml"));
        assert_eq!(args.urls, Some(PathBuf::from("urls.txt")));
        assert_eq!(args.gzip, Some(true));
        assert_eq!(args.robots, Some(false));
        assert_eq!(args.submit, None);
    }

    #[test]
    fn test_check_alias_with_global_flags() {
        let cli = Cli::parse_from(["sitemap-gen", "c", "-C", "site/sitemap.toml", "-v"]);
        assert!(matches!(cli.command, Commands::Check { .. }));
        assert_eq!(cli.config, PathBuf::from("site/sitemap.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sitemap-gen", "build", "-q", "-v"]).is_err());
    }
}
