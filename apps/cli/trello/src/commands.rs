use crate::cli::Command;
use crate::error::TrelloCliError;

use log::info;
use serde::Serialize;
use serde_json::Value;
use trello_core::ResilientApiClient;
use trello_core::services::board::CURRENT_MEMBER;
use trello_core::services::{BoardService, CardService, ChecklistService, ListService};

/// Run one command and return its result as JSON for printing.
pub async fn execute(command: &Command, client: &ResilientApiClient) -> Result<Value, TrelloCliError> {
    let boards = BoardService::new(client);
    let lists = ListService::new(client);
    let cards = CardService::new(client);
    let checklists = ChecklistService::new(client);

    match command {
        Command::Boards => to_json(boards.get_boards(CURRENT_MEMBER).await?),
        Command::Board { board_id } => to_json(boards.get_board(board_id).await?),
        Command::Labels { board_id } => to_json(boards.get_board_labels(board_id).await?),
        Command::Lists { board_id } => to_json(lists.get_lists(board_id).await?),
        Command::Cards { list_id } => to_json(cards.get_cards(list_id).await?),
        Command::Card { card_id } => to_json(cards.get_card(card_id).await?),
        Command::Comments { card_id } => to_json(cards.get_card_comments(card_id).await?),
        Command::Comment { card_id, text } => {
            let comment = cards.add_comment(card_id, text).await?;
            info!("Added comment {} to card {card_id}", comment.id);
            to_json(comment)
        }
        Command::Checklists { card_id } => to_json(checklists.get_card_checklists(card_id).await?),
        Command::MoveCard {
            card_id,
            list_id,
            pos,
        } => {
            let card = cards.move_card(card_id, list_id, pos.as_deref()).await?;
            info!("Moved card {card_id} to list {list_id}");
            to_json(card)
        }
        Command::ArchiveList { list_id } => {
            let list = lists.archive_list(list_id).await?;
            info!("Archived list {list_id}");
            to_json(list)
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, TrelloCliError> {
    Ok(serde_json::to_value(value)?)
}
