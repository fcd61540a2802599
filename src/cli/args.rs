//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::NodeKey;

/// Target allocation planner: portfolio → asset class → fund → holding
#[derive(Parser, Debug)]
#[command(name = "alloctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (overrides the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the allocation tree and totals
    Show,

    /// List all node keys
    Keys,

    /// Add a node below KEY (or a new portfolio when omitted)
    Add {
        /// Parent key, e.g. 0-1
        parent: Option<NodeKey>,
        /// Node name
        #[arg(short, long)]
        name: Option<String>,
        /// Value: percentage for levels 1-3, amount for holdings
        #[arg(short, long, allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Rename a node or change its value
    Update {
        /// Node key, e.g. 0-1-2
        key: NodeKey,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New value, e.g. "25%" or "¥ 12,000"
        #[arg(short, long, allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Remove a node and everything below it
    Remove {
        /// Node key
        key: NodeKey,
    },

    /// Copy the current snapshot to the backup slot
    Backup,

    /// Replace the current tree with the last backup
    Restore,

    /// Print the chart model as JSON
    Chart {
        /// Print ring labels as a tree instead of JSON
        #[arg(long)]
        rings: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a commented template
    Template,
    /// Print the global config path
    Path,
}
