use super::TrelloLabel;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub closed: bool,
    pub id_list: String,
    pub id_board: String,
    pub url: String,
    pub pos: f64,
    #[serde(default)]
    pub labels: Vec<TrelloLabel>,
    /// ISO 8601 due date.
    #[serde(default)]
    pub due: Option<String>,
}
