use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckItemState {
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCheckItem {
    pub id: String,
    pub name: String,
    pub state: CheckItemState,
    #[serde(default)]
    pub id_checklist: Option<String>,
    #[serde(default)]
    pub pos: Option<f64>,
}

impl TrelloCheckItem {
    pub fn is_complete(&self) -> bool {
        self.state == CheckItemState::Complete
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloChecklist {
    pub id: String,
    pub name: String,
    pub id_card: String,
    #[serde(default)]
    pub id_board: Option<String>,
    #[serde(default)]
    pub pos: Option<f64>,
    #[serde(default)]
    pub check_items: Vec<TrelloCheckItem>,
}

impl TrelloChecklist {
    /// (completed, total)
    pub fn progress(&self) -> (usize, usize) {
        let done = self.check_items.iter().filter(|item| item.is_complete()).count();
        (done, self.check_items.len())
    }
}
