//! CLI module - Command-line interface for TravelAI
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// TravelAI - travel destination recommendations
#[derive(Parser)]
#[command(name = "travelai")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Show recent searches
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(long, short, default_value = "10")]
        limit: u64,
    },

    /// List travel plans
    #[command(alias = "ls")]
    Plans,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::try_parse_from(["travelai"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn history_limit() {
        let cli = Cli::try_parse_from(["travelai", "history", "--limit", "3"]).unwrap();
        assert_eq!(cli.command, Some(Commands::History { limit: 3 }));

        let cli = Cli::try_parse_from(["travelai", "h"]).unwrap();
        assert_eq!(cli.command, Some(Commands::History { limit: 10 }));
    }
}
