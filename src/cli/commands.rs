//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse crowdfunding campaign records as a paginated table
#[derive(Parser, Debug)]
#[command(name = "campaign-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Source URL (overrides the config file)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Read records from a local JSON file instead of a URL
    #[arg(short, long, global = true, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Records per page
    #[arg(short = 'n', long, global = true)]
    pub page_size: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of the table
    Show {
        /// Page to show (clamped to the available pages)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Navigate the table interactively (n = next, p = previous, r = reload, q = quit)
    Browse,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Text,
    /// Page snapshot as JSON
    Json,
    /// Standalone HTML page
    Html,
}
