use super::decode;
use crate::ResilientApiClient;
use crate::error::CoreError;
use crate::models::{TrelloCheckItem, TrelloChecklist};

use serde_json::{Map, Value, json};

pub struct ChecklistService<'a> {
    client: &'a ResilientApiClient,
}

impl<'a> ChecklistService<'a> {
    pub fn new(client: &'a ResilientApiClient) -> Self {
        Self { client }
    }

    pub async fn get_checklist(&self, checklist_id: &str) -> Result<TrelloChecklist, CoreError> {
        let response = self
            .client
            .get(&format!("/checklists/{checklist_id}"), None)
            .await?;
        Ok(decode("checklist", response)?)
    }

    pub async fn get_card_checklists(&self, card_id: &str) -> Result<Vec<TrelloChecklist>, CoreError> {
        let response = self
            .client
            .get(&format!("/cards/{card_id}/checklists"), None)
            .await?;
        Ok(decode("checklists", response)?)
    }

    pub async fn create_checklist(
        &self,
        card_id: &str,
        name: &str,
        pos: Option<&str>,
    ) -> Result<TrelloChecklist, CoreError> {
        let mut body = Map::new();
        body.insert("idCard".to_string(), json!(card_id));
        body.insert("name".to_string(), json!(name));
        insert_opt(&mut body, "pos", pos);

        let response = self.client.post("/checklists", Some(&Value::Object(body))).await?;
        Ok(decode("checklist", response)?)
    }

    pub async fn update_checklist(
        &self,
        checklist_id: &str,
        name: Option<&str>,
        pos: Option<&str>,
    ) -> Result<TrelloChecklist, CoreError> {
        let mut body = Map::new();
        insert_opt(&mut body, "name", name);
        insert_opt(&mut body, "pos", pos);

        let response = self
            .client
            .put(&format!("/checklists/{checklist_id}"), Some(&Value::Object(body)))
            .await?;
        Ok(decode("checklist", response)?)
    }

    pub async fn delete_checklist(&self, checklist_id: &str) -> Result<Value, CoreError> {
        Ok(self
            .client
            .delete(&format!("/checklists/{checklist_id}"), None)
            .await?)
    }

    pub async fn add_checkitem(
        &self,
        checklist_id: &str,
        name: &str,
        checked: bool,
        pos: Option<&str>,
    ) -> Result<TrelloCheckItem, CoreError> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        body.insert("checked".to_string(), json!(checked));
        insert_opt(&mut body, "pos", pos);

        let response = self
            .client
            .post(
                &format!("/checklists/{checklist_id}/checkItems"),
                Some(&Value::Object(body)),
            )
            .await?;
        Ok(decode("check item", response)?)
    }

    pub async fn update_checkitem(
        &self,
        checklist_id: &str,
        checkitem_id: &str,
        name: Option<&str>,
        checked: Option<bool>,
        pos: Option<&str>,
    ) -> Result<TrelloCheckItem, CoreError> {
        let mut body = Map::new();
        insert_opt(&mut body, "name", name);
        if let Some(checked) = checked {
            body.insert("checked".to_string(), json!(checked));
        }
        insert_opt(&mut body, "pos", pos);

        let response = self
            .client
            .put(
                &format!("/checklists/{checklist_id}/checkItems/{checkitem_id}"),
                Some(&Value::Object(body)),
            )
            .await?;
        Ok(decode("check item", response)?)
    }

    pub async fn delete_checkitem(&self, checklist_id: &str, checkitem_id: &str) -> Result<Value, CoreError> {
        Ok(self
            .client
            .delete(
                &format!("/checklists/{checklist_id}/checkItems/{checkitem_id}"),
                None,
            )
            .await?)
    }
}

// Empty strings are treated like absent values.
fn insert_opt(body: &mut Map<String, Value>, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        body.insert(name.to_string(), json!(value));
    }
}
