use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "trello")]
#[command(about = "Inspect and update Trello boards", long_about = None)]
pub struct Cli {
    /// Directory for trello.log (defaults to the platform data directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List boards of the authenticated member
    Boards,
    /// Show one board
    Board { board_id: String },
    /// List labels defined on a board
    Labels { board_id: String },
    /// List the lists on a board
    Lists { board_id: String },
    /// List the cards in a list
    Cards { list_id: String },
    /// Show one card
    Card { card_id: String },
    /// List comments on a card
    Comments { card_id: String },
    /// Add a comment to a card
    Comment { card_id: String, text: String },
    /// List checklists on a card
    Checklists { card_id: String },
    /// Move a card to another list
    MoveCard {
        card_id: String,
        list_id: String,
        /// "top", "bottom" or a positive number
        #[arg(long)]
        pos: Option<String>,
    },
    /// Archive a list
    ArchiveList { list_id: String },
}
