//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Resolve backend kind, store location, logging and poll interval.
//! - Keep every environment lookup in the client; the core only receives an
//!   opened store.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Original autorefresh period of the shared list page.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

#[derive(Debug, Parser)]
#[command(name = "shoplist")]
#[command(about = "Shared checkbox shopping list", long_about = None, version)]
pub struct Cli {
    /// Persistence backend for the shared list
    #[arg(long, value_enum, env = "SHOPLIST_BACKEND", default_value_t = Backend::Json)]
    pub backend: Backend,

    /// Store location (JSON document or SQLite sheet file)
    #[arg(long, env = "SHOPLIST_STORE")]
    pub store: Option<PathBuf>,

    /// Absolute directory for rolling log files; file logging is off when unset
    #[arg(long, env = "SHOPLIST_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "SHOPLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Store path, falling back to a per-backend default file name.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.backend.default_file_name()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// JSON document with native booleans
    Json,
    /// Two-column `nom`/`coche` sheet stored in SQLite
    Sheet,
}

impl Backend {
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "shoplist.json",
            Self::Sheet => "shoplist.sqlite3",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the list, split into to-buy and in-cart items
    List,
    /// Add an item (name is trimmed and capitalized)
    Add {
        /// Item name; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Mark an item as in the cart
    Check {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Move an item back to the to-buy list
    Uncheck {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove every checked item
    ClearChecked,
    /// Remove every item
    ClearAll,
    /// Re-render the list on a fixed polling interval
    Watch {
        /// Seconds between refreshes
        #[arg(
            long,
            env = "SHOPLIST_POLL_INTERVAL_SECS",
            default_value_t = DEFAULT_POLL_INTERVAL_SECS,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        interval_secs: u64,

        /// Stop after this many refreshes
        #[arg(long)]
        iterations: Option<u64>,
    },
}
