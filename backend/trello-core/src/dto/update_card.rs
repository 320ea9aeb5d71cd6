use serde::{Deserialize, Serialize};

/// Fields to change on a card. Unset fields are omitted from the request.
///
/// All fields go out in one PUT, so an update is applied entirely or not at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    /// Comma-separated member ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_members: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_list: Option<String>,
    /// Comma-separated label ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_board: Option<String>,
    /// "top", "bottom" or a positive number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
}
