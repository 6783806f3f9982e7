//! sitemap-gen - XML sitemap generator.

use clap::{ColorChoice, Parser};
use sitemap_gen::{
    cli::{
        Cli, Commands,
        build::{build_sitemaps, check_sitemaps},
    },
    config::Config,
    logger,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);
    logger::set_quiet(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli)?;

    match &cli.command {
        Commands::Build { args } => build_sitemaps(&config, args).map(|_| ()),
        Commands::Check { args } => check_sitemaps(&config, args).map(|_| ()),
    }
}
