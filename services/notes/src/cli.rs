use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse and check study notes content.
#[derive(Parser, Debug)]
#[command(name = "notes", version, about)]
pub struct Cli {
    /// Content document or directory; overrides CONTENT_PATH.
    #[arg(long, global = true, value_name = "PATH")]
    pub content: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load and validate the content, then print corpus counts.
    Check,
    /// Print topic keys in load order.
    List {
        /// Only topics of this subject.
        #[arg(long)]
        subject: Option<String>,
    },
    /// Print one topic.
    Show {
        key: String,
        /// Print the topic as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print keys of topics whose name or summary contains NEEDLE.
    Search { needle: String },
    /// Print the JSON Schema of a content document.
    Schema,
}
