//! Command-line arguments

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "linkgate", version, about = "URL shortening redirect service")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Create a link
    Add {
        /// Destination URL
        url: String,
        /// Custom token instead of a generated one
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Look up the destination of a token
    Get { token: String },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ConfigAction {
    /// Print or write a sample configuration
    Generate {
        #[arg(short, long)]
        output: Option<String>,
    },
}
