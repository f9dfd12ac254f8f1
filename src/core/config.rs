use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "texplorer", version, about = "Terminal file explorer")]
pub struct Cli {
    /// Directory to start in (defaults to the current directory)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Emit JSON lines instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Action>,
}

/// One explorer operation. Without a subcommand the interactive menu runs.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// List the current directory
    Ls,
    /// Change directory and print the result
    Cd { path: String },
    /// Copy a file byte for byte, overwriting the destination
    Cp { source: String, target: String },
    /// Rename a file
    Mv { from: String, to: String },
    /// Delete a file or empty directory
    Rm { path: String },
    /// Create an empty file
    Touch { path: String },
    /// Search names below the current directory
    Find { needle: String },
    /// Show the permission string of a file
    Perms { path: String },
    /// Set permissions from a string like rwxr-xr--
    Chmod {
        path: String,
        #[arg(allow_hyphen_values = true)]
        symbolic: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub start_dir: Option<PathBuf>,
    pub output: OutputFormat,
    pub log_filter: String,
}

impl Cli {
    pub fn into_config(self) -> (Config, Option<Action>) {
        let output = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        let config = Config {
            start_dir: self.dir,
            output,
            log_filter: self.log_level,
        };
        (config, self.command)
    }
}
