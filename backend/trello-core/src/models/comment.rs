//! Card comments.
//!
//! Trello has no comment resource; comments are `commentCard` actions on a
//! card. [`CommentAction`] mirrors the raw action and is flattened into
//! [`TrelloComment`].

use serde::{Deserialize, Serialize};

pub const COMMENT_ACTION_TYPE: &str = "commentCard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloComment {
    /// Id of the underlying action.
    pub id: String,
    pub text: String,
    /// ISO 8601 creation time.
    pub date: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentAction {
    id: String,
    #[serde(rename = "type")]
    pub(crate) action_type: String,
    date: String,
    data: CommentData,
    #[serde(default)]
    member_creator: Option<MemberCreator>,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MemberCreator {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl From<CommentAction> for TrelloComment {
    fn from(action: CommentAction) -> Self {
        let author = action
            .member_creator
            .and_then(|member| member.full_name.or(member.username));

        TrelloComment {
            id: action.id,
            text: action.data.text,
            date: action.date,
            author,
        }
    }
}
