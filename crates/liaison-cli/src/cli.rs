//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Liaison - vendor meeting agenda tracker
#[derive(Parser, Debug)]
#[command(name = "liaison")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "LIAISON_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a vendor's ranked agenda
    Agenda {
        /// Vendor id
        #[arg(required = true)]
        vendor: String,

        /// Maximum number of agenda entries
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },

    /// Print the copy-out snapshot table for a vendor
    Export {
        /// Vendor id
        #[arg(required = true)]
        vendor: String,

        /// Maximum number of agenda entries
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },

    /// Add a discussion topic to a vendor's agenda
    Add {
        /// Vendor id
        #[arg(required = true)]
        vendor: String,

        /// Topic title
        #[arg(required = true)]
        title: String,

        /// Free-text context
        #[arg(long)]
        context: Option<String>,

        /// What to ask the vendor
        #[arg(long)]
        ask: Option<String>,
    },

    /// Run an interactive agenda session for a vendor
    Repl {
        /// Vendor id
        #[arg(required = true)]
        vendor: String,

        /// Maximum number of agenda entries
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".liaison"))
                .unwrap_or_else(|| PathBuf::from(".liaison"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
