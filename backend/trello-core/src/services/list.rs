use super::decode;
use crate::ResilientApiClient;
use crate::error::CoreError;
use crate::models::TrelloList;

use serde_json::json;

pub const DEFAULT_LIST_POSITION: &str = "bottom";

pub struct ListService<'a> {
    client: &'a ResilientApiClient,
}

impl<'a> ListService<'a> {
    pub fn new(client: &'a ResilientApiClient) -> Self {
        Self { client }
    }

    pub async fn get_list(&self, list_id: &str) -> Result<TrelloList, CoreError> {
        let response = self.client.get(&format!("/lists/{list_id}"), None).await?;
        Ok(decode("list", response)?)
    }

    pub async fn get_lists(&self, board_id: &str) -> Result<Vec<TrelloList>, CoreError> {
        let response = self
            .client
            .get(&format!("/boards/{board_id}/lists"), None)
            .await?;
        Ok(decode("lists", response)?)
    }

    /// `pos` is "top", "bottom" or a positive number; defaults to [`DEFAULT_LIST_POSITION`].
    pub async fn create_list(
        &self,
        board_id: &str,
        name: &str,
        pos: Option<&str>,
    ) -> Result<TrelloList, CoreError> {
        let body = json!({
            "name": name,
            "idBoard": board_id,
            "pos": pos.unwrap_or(DEFAULT_LIST_POSITION),
        });
        let response = self.client.post("/lists", Some(&body)).await?;
        Ok(decode("list", response)?)
    }

    pub async fn update_list(&self, list_id: &str, name: &str) -> Result<TrelloList, CoreError> {
        let body = json!({ "name": name });
        let response = self
            .client
            .put(&format!("/lists/{list_id}"), Some(&body))
            .await?;
        Ok(decode("list", response)?)
    }

    /// Lists cannot be deleted, only archived.
    pub async fn archive_list(&self, list_id: &str) -> Result<TrelloList, CoreError> {
        let body = json!({ "value": "true" });
        let response = self
            .client
            .put(&format!("/lists/{list_id}/closed"), Some(&body))
            .await?;
        Ok(decode("list", response)?)
    }
}
