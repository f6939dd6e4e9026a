//! CLI module for vidbrief.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// vidbrief - video summaries, chapters and follow-up questions
///
/// Indexes local videos with Twelve Labs, writes the vendor's summaries and
/// chapters to flat files, and answers follow-up questions through Kindo.
#[derive(Parser, Debug)]
#[command(name = "vidbrief")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Twelve Labs API key
    #[arg(long, env = "TWELVELABS_API_KEY", hide_env_values = true, global = true)]
    pub twelvelabs_api_key: Option<String>,

    /// Kindo API key
    #[arg(long, env = "KINDO_API_KEY", hide_env_values = true, global = true)]
    pub kindo_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host from the config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from the config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create an index and upload the videos from the index's video directory
    Index {
        /// Index name; videos are read from <videos_dir>/<name>/
        name: String,
    },

    /// Write a summary, chapter or gist report for an index
    Report {
        /// Index name
        name: String,

        /// Report kind (summary, chapter, gist)
        #[arg(short, long, default_value = "summary")]
        kind: String,
    },

    /// Run a free-form prompt against every video of an index
    Query {
        /// Index name
        name: String,

        /// The prompt to send
        prompt: String,
    },

    /// Ask a follow-up question about an index's stored summary
    Ask {
        /// Index name
        name: String,

        /// The question to ask
        prompt: String,
    },

    /// Check API keys, directories and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
