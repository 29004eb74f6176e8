//! CLI command definitions.

use clap::{Parser, Subcommand};

/// Vermeer - mirror and optimize Notion-hosted images into owned storage
#[derive(Parser, Debug)]
#[command(name = "vermeer")]
#[command(about = "Mirror and optimize Notion-hosted images into owned storage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror image references for configured collections
    Mirror {
        /// Single collection to mirror (e.g. "stack", "writing");
        /// all configured collections when omitted
        #[arg(long)]
        collection: Option<String>,
    },

    /// Show how the pipeline classifies a URL
    Classify {
        /// The URL to classify
        url: String,
    },
}
