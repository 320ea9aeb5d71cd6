//! Typed operations over boards, lists, cards and checklists.
//!
//! Each service borrows a [`ResilientApiClient`](crate::ResilientApiClient)
//! and converts its raw JSON into the models in [`crate::models`].

pub mod board;
pub mod card;
pub mod checklist;
pub mod list;

pub use board::BoardService;
pub use card::CardService;
pub use checklist::ChecklistService;
pub use list::ListService;

use crate::error::ModelError;

use serde::de::DeserializeOwned;
use serde_json::Value;

#[track_caller]
pub(crate) fn decode<T: DeserializeOwned>(model: &'static str, value: Value) -> Result<T, ModelError> {
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(decoded),
        Err(e) => Err(ModelError::decode(model, e)),
    }
}
