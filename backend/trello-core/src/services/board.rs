use super::decode;
use crate::ResilientApiClient;
use crate::error::CoreError;
use crate::models::{TrelloBoard, TrelloLabel};

use log::debug;

/// Member id Trello resolves to the owner of the token.
pub const CURRENT_MEMBER: &str = "me";

pub struct BoardService<'a> {
    client: &'a ResilientApiClient,
}

impl<'a> BoardService<'a> {
    pub fn new(client: &'a ResilientApiClient) -> Self {
        Self { client }
    }

    pub async fn get_board(&self, board_id: &str) -> Result<TrelloBoard, CoreError> {
        let response = self.client.get(&format!("/boards/{board_id}"), None).await?;
        Ok(decode("board", response)?)
    }

    /// Boards of `member_id`; pass [`CURRENT_MEMBER`] for the authenticated user.
    pub async fn get_boards(&self, member_id: &str) -> Result<Vec<TrelloBoard>, CoreError> {
        let response = self
            .client
            .get(&format!("/members/{member_id}/boards"), None)
            .await?;
        let boards: Vec<TrelloBoard> = decode("boards", response)?;
        debug!("Retrieved {} boards for member {member_id}", boards.len());
        Ok(boards)
    }

    pub async fn get_board_labels(&self, board_id: &str) -> Result<Vec<TrelloLabel>, CoreError> {
        let response = self
            .client
            .get(&format!("/boards/{board_id}/labels"), None)
            .await?;
        Ok(decode("labels", response)?)
    }
}
