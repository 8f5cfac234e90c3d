//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use downloadstation_core::api::DEFAULT_TASK_QUERY_LIMIT;

/// Manage downloads on a QNAP Download Station.
///
/// Connection settings come from flags or from
/// `$XDG_CONFIG_HOME/downloadstation/config.toml`; flags win.
#[derive(Parser, Debug)]
#[command(name = "downloadstation")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// NAS host, optionally with port (e.g. nas.local:8080)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Account name
    #[arg(short = 'u', long, global = true)]
    pub username: Option<String>,

    /// Account password
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// Use https instead of http
    #[arg(long, global = true)]
    pub https: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and print the session token
    Login,

    /// End the session
    Logout,

    /// List tasks
    Tasks {
        /// Sort field
        #[arg(long)]
        field: Option<String>,

        /// Sort descending (only meaningful with --field)
        #[arg(long)]
        descending: bool,

        /// Maximum number of tasks
        #[arg(long, default_value_t = DEFAULT_TASK_QUERY_LIMIT)]
        limit: u64,

        /// Offset of the first task
        #[arg(long)]
        from: Option<u64>,
    },

    /// Add a download by URL or magnet link
    AddUrl {
        url: String,

        /// Destination folder for finished downloads
        #[arg(long = "move")]
        move_path: String,

        /// Folder for in-progress data (defaults to --move)
        #[arg(long = "temp")]
        temp_path: Option<String>,
    },

    /// Upload a .torrent file
    AddTorrent {
        file: PathBuf,

        /// Destination folder for finished downloads
        #[arg(long = "move")]
        move_path: String,

        /// Folder for in-progress data (defaults to --move)
        #[arg(long = "temp")]
        temp_path: Option<String>,
    },

    /// Start a task
    Start { hash: String },

    /// Stop a task
    Stop { hash: String },

    /// Pause a task
    Pause { hash: String },

    /// Remove a task
    Remove { hash: String },

    /// Call any endpoint: GROUP ACTION [key=value ...]
    Call {
        group: String,
        action: String,
        #[arg(value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}
