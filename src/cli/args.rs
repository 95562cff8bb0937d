//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Publish a pre-compressed static site to a storage bucket behind a CDN
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: sitedrop.toml)
    #[arg(short = 'C', long, global = true, default_value = "sitedrop.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the objects that would be uploaded, with their metadata
    #[command(visible_alias = "p")]
    Publish {
        /// Print records as JSON instead of a table
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long, requires = "json")]
        pretty: bool,
    },

    /// Emit the declarative stack program (bucket, objects, CDN, edge function)
    #[command(visible_alias = "st")]
    Stack {
        /// Write the program to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show which object the edge function would serve for a request
    #[command(visible_alias = "r")]
    Route {
        /// Request URI, e.g. `/docs/`
        uri: String,

        /// Accept-Encoding header sent by the viewer
        #[arg(short = 'e', long = "accept-encoding")]
        accept_encoding: Option<String>,
    },

    /// Preview the site locally, negotiating encodings like the edge function
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}
