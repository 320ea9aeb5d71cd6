//! Typed views of the Trello resources the services return.
//!
//! Field names follow the API's camelCase JSON; unknown fields are ignored.

pub mod board;
pub mod card;
pub mod checklist;
pub mod comment;
pub mod list;

pub use board::{TrelloBoard, TrelloLabel};
pub use card::TrelloCard;
pub use checklist::{CheckItemState, TrelloCheckItem, TrelloChecklist};
pub use comment::TrelloComment;
pub use list::TrelloList;
