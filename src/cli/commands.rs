//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Disqus API command-line client
#[derive(Parser, Debug)]
#[command(name = "disqust")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Public API key, sent as `api_key`
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Default parameter sent with every request (key=value, repeatable)
    #[arg(long = "default-param", global = true)]
    pub default_params: Vec<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every request command
#[derive(clap::Args, Debug, Clone)]
pub struct RequestArgs {
    /// Resource name, e.g. `forums/listPosts`
    pub resource: String,

    /// HTTP method
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Request parameter (key=value, repeatable)
    #[arg(short, long = "param")]
    pub params: Vec<String>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single response and print it
    Get {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Follow the cursor and print each page as one JSON line
    Pages {
        #[command(flatten)]
        request: RequestArgs,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Follow the cursor and print each result item as one JSON line
    Items {
        #[command(flatten)]
        request: RequestArgs,

        /// Stop after this many items
        #[arg(long)]
        max_items: Option<usize>,
    },
}
