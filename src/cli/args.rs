// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Directory holding the bookmark store (overrides the config file)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to config file (default: <config dir>/linkcards/config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an empty card
    NewCard {
        #[arg(value_name = "TITLE")]
        title: String,

        #[arg(long, default_value = "")]
        desc: String,
    },

    /// Change a card's title or description
    EditCard {
        #[arg(value_name = "CARD_ID")]
        card_id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        desc: Option<String>,
    },

    /// Delete a card and all of its links
    DeleteCard {
        #[arg(value_name = "CARD_ID")]
        card_id: String,
    },

    /// Add a link; without --card a new card named after the host is created
    AddLink {
        #[arg(value_name = "URL")]
        url: String,

        #[arg(long, value_name = "CARD_ID")]
        card: Option<String>,

        #[arg(long, default_value = "")]
        title: String,

        /// Free text; comma separated entries become card tags
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Change a link's url, title or note
    EditLink {
        #[arg(value_name = "CARD_ID")]
        card_id: String,

        #[arg(value_name = "LINK_ID")]
        link_id: String,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Remove a link from a card
    RemoveLink {
        #[arg(value_name = "CARD_ID")]
        card_id: String,

        #[arg(value_name = "LINK_ID")]
        link_id: String,
    },

    /// Add tags to a card
    Tag {
        #[arg(value_name = "CARD_ID")]
        card_id: String,

        #[arg(value_name = "TAG", required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Remove a tag from a card
    Untag {
        #[arg(value_name = "CARD_ID")]
        card_id: String,

        #[arg(value_name = "TAG")]
        tag: String,
    },

    /// List cards, optionally filtered by a search query
    List {
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Output the filtered view as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Output the filtered view as an HTML page with matches highlighted
        #[arg(long)]
        html: bool,
    },

    /// Write a timestamped JSON backup
    Export {
        /// Target file or directory (default: the configured export dir)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Merge a JSON backup into the store without overwriting anything
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Remove every card and link
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Run legacy schema migrations and report the result
    Migrate,
}
