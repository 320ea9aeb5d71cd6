use crate::dto::UpdateCardPayload;
use crate::models::comment::CommentAction;
use crate::models::{TrelloCard, TrelloChecklist, TrelloComment};

use serde_json::json;

#[test]
fn given_card_json_when_decoded_then_reads_camel_case_fields() {
    let card: TrelloCard = serde_json::from_value(json!({
        "id": "c1",
        "name": "Write docs",
        "idList": "l1",
        "idBoard": "b1",
        "url": "https://trello.com/c/c1",
        "pos": 16384.5,
        "labels": [{ "id": "lab1", "name": "urgent", "color": "red" }],
        "badges": { "votes": 0 }
    }))
    .unwrap();

    assert_eq!(card.id_list, "l1");
    assert!(!card.closed);
    assert_eq!(card.labels[0].color.as_deref(), Some("red"));
    assert_eq!(card.due, None);
}

#[test]
fn given_checklist_json_when_decoded_then_reports_progress() {
    let checklist: TrelloChecklist = serde_json::from_value(json!({
        "id": "cl1",
        "name": "Release",
        "idCard": "c1",
        "checkItems": [
            { "id": "i1", "name": "tag", "state": "complete" },
            { "id": "i2", "name": "publish", "state": "incomplete" }
        ]
    }))
    .unwrap();

    assert_eq!(checklist.progress(), (1, 2));
}

/// **VALUE**: Comment actions flatten into text, date and a readable author.
#[test]
fn given_comment_action_when_converted_then_prefers_full_name() {
    let action: CommentAction = serde_json::from_value(json!({
        "id": "a1",
        "type": "commentCard",
        "date": "2024-05-01T10:00:00.000Z",
        "data": { "text": "Looks good", "card": { "id": "c1" } },
        "memberCreator": { "fullName": "Sam Doe", "username": "samdoe" }
    }))
    .unwrap();

    let comment = TrelloComment::from(action);

    assert_eq!(comment.text, "Looks good");
    assert_eq!(comment.author.as_deref(), Some("Sam Doe"));
}

/// **VALUE**: Only fields the caller set are sent in a card update.
///
/// **BUG THIS CATCHES**: Would catch `null` being sent for untouched fields, which
/// Trello applies and clears the description or due date.
#[test]
fn given_partial_update_when_serialized_then_omits_unset_fields() {
    let payload = UpdateCardPayload {
        name: Some("Renamed".to_string()),
        due_complete: Some(true),
        ..UpdateCardPayload::default()
    };

    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value, json!({ "name": "Renamed", "dueComplete": true }));
}
