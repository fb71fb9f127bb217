use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlmask")]
#[command(about = "Mask SQL identifiers before sharing a query, restore them afterwards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// History database path (overrides config)
    #[arg(long, global = true, env = "SQLMASK_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mask schema, table, column and alias names in a SQL statement
    Mask {
        /// File with the statement (stdin when omitted)
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Do not record the statement in history
        #[arg(long)]
        no_save: bool,
    },

    /// Restore original names in a masked (possibly edited) statement
    Unmask {
        /// File with the masked statement (stdin when omitted)
        file: Option<PathBuf>,

        /// History id returned by `mask`
        #[arg(long, conflicts_with = "mapping", required_unless_present = "mapping")]
        id: Option<i64>,

        /// JSON file with an alias -> original mapping
        #[arg(long)]
        mapping: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect masking history
    #[command(subcommand)]
    History(HistoryCommands),

    /// Start the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        #[arg(long)]
        read_only: bool,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recorded statements, newest first
    List,

    /// Show a recorded statement with its mapping
    Show {
        /// History id
        id: i64,
    },

    /// Delete a recorded statement
    Delete {
        /// History id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,
}
