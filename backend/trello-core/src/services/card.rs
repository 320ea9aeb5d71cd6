use super::decode;
use crate::ResilientApiClient;
use crate::api_client::{HttpMethod, QueryParams};
use crate::dto::UpdateCardPayload;
use crate::error::{CoreError, ModelError};
use crate::models::comment::{COMMENT_ACTION_TYPE, CommentAction};
use crate::models::{TrelloCard, TrelloComment};

use serde_json::{Map, Value, json};

pub struct CardService<'a> {
    client: &'a ResilientApiClient,
}

impl<'a> CardService<'a> {
    pub fn new(client: &'a ResilientApiClient) -> Self {
        Self { client }
    }

    pub async fn get_card(&self, card_id: &str) -> Result<TrelloCard, CoreError> {
        let response = self.client.get(&format!("/cards/{card_id}"), None).await?;
        Ok(decode("card", response)?)
    }

    pub async fn get_cards(&self, list_id: &str) -> Result<Vec<TrelloCard>, CoreError> {
        let response = self
            .client
            .get(&format!("/lists/{list_id}/cards"), None)
            .await?;
        Ok(decode("cards", response)?)
    }

    pub async fn create_card(
        &self,
        list_id: &str,
        name: &str,
        desc: Option<&str>,
    ) -> Result<TrelloCard, CoreError> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        body.insert("idList".to_string(), json!(list_id));
        if let Some(desc) = desc.filter(|d| !d.is_empty()) {
            body.insert("desc".to_string(), json!(desc));
        }

        let response = self.client.post("/cards", Some(&Value::Object(body))).await?;
        Ok(decode("card", response)?)
    }

    /// Sends only the fields set on `payload`, in a single request.
    pub async fn update_card(
        &self,
        card_id: &str,
        payload: &UpdateCardPayload,
    ) -> Result<TrelloCard, CoreError> {
        let body = serde_json::to_value(payload).map_err(|e| ModelError::decode("card update", e))?;
        let response = self
            .client
            .put(&format!("/cards/{card_id}"), Some(&body))
            .await?;
        Ok(decode("card", response)?)
    }

    /// Returns the API's raw delete acknowledgement.
    pub async fn delete_card(&self, card_id: &str) -> Result<Value, CoreError> {
        Ok(self.client.delete(&format!("/cards/{card_id}"), None).await?)
    }

    pub async fn move_card(
        &self,
        card_id: &str,
        list_id: &str,
        pos: Option<&str>,
    ) -> Result<TrelloCard, CoreError> {
        let payload = UpdateCardPayload {
            id_list: Some(list_id.to_string()),
            pos: pos.map(str::to_string),
            ..UpdateCardPayload::default()
        };
        self.update_card(card_id, &payload).await
    }

    /// Comments on a card, newest first as returned by the API.
    pub async fn get_card_comments(&self, card_id: &str) -> Result<Vec<TrelloComment>, CoreError> {
        let query = QueryParams::from([("filter".to_string(), COMMENT_ACTION_TYPE.to_string())]);
        let response = self
            .client
            .get(&format!("/cards/{card_id}/actions"), Some(&query))
            .await?;

        let actions: Vec<CommentAction> = decode("comments", response)?;
        Ok(actions
            .into_iter()
            .filter(|action| action.action_type == COMMENT_ACTION_TYPE)
            .map(TrelloComment::from)
            .collect())
    }

    pub async fn add_comment(&self, card_id: &str, text: &str) -> Result<TrelloComment, CoreError> {
        let query = QueryParams::from([("text".to_string(), text.to_string())]);
        let response = self
            .client
            .request(
                HttpMethod::Post,
                &format!("/cards/{card_id}/actions/comments"),
                Some(&query),
                None,
            )
            .await?;

        let action: CommentAction = decode("comment", response)?;
        Ok(TrelloComment::from(action))
    }
}
