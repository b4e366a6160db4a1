//! anchorlint - anchor and cross-link checker for static HTML documentation.

#![allow(dead_code)]

mod address;
mod cli;
mod config;
mod core;
mod corpus;
mod index;
mod logger;
mod page;
mod report;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::LintConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = LintConfig::load(&cli)?;

    match &cli.command {
        Commands::Check { args } => cli::check::check_site(args, &config),
        Commands::Index { args } => cli::index::print_index(args, &config),
        Commands::Anchors { args } => cli::anchors::dump_anchors(args, &config),
    }
}
