//! sitedrop - publish a pre-compressed static site behind a CDN.

mod asset;
mod cli;
mod config;
mod edge;
mod embed;
mod logger;
mod stack;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    cli::serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Publish { json, pretty } => cli::publish::run(&config, *json, *pretty),
        Commands::Stack { output, pretty } => {
            cli::stack::run(&config, output.as_deref(), *pretty)
        }
        Commands::Route {
            uri,
            accept_encoding,
        } => cli::route::run(&config, uri, accept_encoding.as_deref()),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
    }
}
