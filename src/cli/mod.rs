//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Flasky Notes CLI - sync a directory of Markdown notes with a Flasky server
#[derive(Parser, Debug)]
#[command(name = "flasky", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server domain, e.g. notes.example.com
    #[arg(long, global = true, env = "FLASKY_DOMAIN")]
    pub domain: Option<String>,

    /// Local notes directory (default: ~/.flasky/notes)
    #[arg(long, global = true, env = "FLASKY_NOTES_DIR")]
    pub notes_dir: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note on the server
    New {
        /// Note title (underscores are treated as spaces)
        title: String,

        /// Optional category label
        #[arg(long, default_value = "")]
        category: String,
    },

    /// List notes on the server
    List {
        /// Maximum number of notes to list
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Also print each note's content
        #[arg(long)]
        content: bool,
    },

    /// Fetch and print a single note
    Get {
        /// Server-assigned note id
        note_id: i64,
    },

    /// Sync local notes with the server
    Sync,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
