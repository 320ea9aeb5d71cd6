use crate::helpers::client_for;

use trello_core::CoreError;
use trello_core::dto::UpdateCardPayload;
use trello_core::error::ApiErrorKind;
use trello_core::models::CheckItemState;
use trello_core::services::board::CURRENT_MEMBER;
use trello_core::services::{BoardService, CardService, ChecklistService, ListService};

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn card_json(id: &str, list_id: &str) -> Value {
    json!({
        "id": id,
        "name": "Card",
        "idList": list_id,
        "idBoard": "b1",
        "url": format!("https://trello.com/c/{id}"),
        "pos": 1.0
    })
}

fn list_json(id: &str, name: &str, closed: bool) -> Value {
    json!({ "id": id, "name": name, "closed": closed, "idBoard": "b1", "pos": 65535 })
}

#[tokio::test]
async fn given_member_boards_when_listing_then_decodes_boards() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b1", "name": "Roadmap", "url": "https://trello.com/b/b1", "idOrganization": "o1" },
            { "id": "b2", "name": "Personal", "url": "https://trello.com/b/b2", "closed": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let boards = BoardService::new(&client).get_boards(CURRENT_MEMBER).await.unwrap();

    assert_eq!(boards.len(), 2);
    assert_eq!(boards[0].id_organization.as_deref(), Some("o1"));
    assert!(boards[1].closed);
}

#[tokio::test]
async fn given_board_labels_when_fetched_then_decodes_labels() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/b1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "lab1", "name": "bug", "color": "red" },
            { "id": "lab2", "name": "", "color": null }
        ])))
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let labels = BoardService::new(&client).get_board_labels("b1").await.unwrap();

    assert_eq!(labels[0].name, "bug");
    assert_eq!(labels[1].color, None);
}

#[tokio::test]
async fn given_new_list_without_position_when_created_then_defaults_to_bottom() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .and(body_json(json!({ "name": "Doing", "idBoard": "b1", "pos": "bottom" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("l9", "Doing", false)))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let list = ListService::new(&client).create_list("b1", "Doing", None).await.unwrap();

    assert_eq!(list.id, "l9");
}

/// **VALUE**: Archiving uses the `closed` sub-resource rather than deleting.
#[tokio::test]
async fn given_list_when_archived_then_puts_closed_value() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/1/lists/l1/closed"))
        .and(body_json(json!({ "value": "true" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("l1", "Old", true)))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let list = ListService::new(&client).archive_list("l1").await.unwrap();

    assert!(list.closed);
}

/// **VALUE**: A multi-field update goes out as one request with only the set fields.
#[tokio::test]
async fn given_partial_payload_when_updating_card_then_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/1/cards/c1"))
        .and(body_json(json!({ "name": "Renamed", "closed": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("c1", "l1")))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);
    let payload = UpdateCardPayload {
        name: Some("Renamed".to_string()),
        closed: Some(false),
        ..UpdateCardPayload::default()
    };

    let card = CardService::new(&client).update_card("c1", &payload).await.unwrap();

    assert_eq!(card.id, "c1");
}

#[tokio::test]
async fn given_card_when_moved_then_updates_list_and_position() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/1/cards/c1"))
        .and(body_json(json!({ "idList": "l2", "pos": "top" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("c1", "l2")))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let card = CardService::new(&client).move_card("c1", "l2", Some("top")).await.unwrap();

    assert_eq!(card.id_list, "l2");
}

#[tokio::test]
async fn given_card_without_description_when_created_then_omits_desc() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .and(body_json(json!({ "name": "Card", "idList": "l1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("c2", "l1")))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let card = CardService::new(&client).create_card("l1", "Card", None).await.unwrap();

    assert_eq!(card.id, "c2");
}

/// **VALUE**: Comments are read from comment actions and flattened.
#[tokio::test]
async fn given_comment_actions_when_listing_comments_then_returns_text_and_author() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/cards/c1/actions"))
        .and(query_param("filter", "commentCard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "a2",
                "type": "commentCard",
                "date": "2024-05-02T10:00:00.000Z",
                "data": { "text": "Shipped" },
                "memberCreator": { "username": "sam" }
            },
            {
                "id": "a1",
                "type": "commentCard",
                "date": "2024-05-01T10:00:00.000Z",
                "data": { "text": "Started" },
                "memberCreator": { "fullName": "Alex Roe", "username": "alex" }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let comments = CardService::new(&client).get_card_comments("c1").await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "Shipped");
    assert_eq!(comments[0].author.as_deref(), Some("sam"));
    assert_eq!(comments[1].author.as_deref(), Some("Alex Roe"));
}

#[tokio::test]
async fn given_comment_text_when_adding_then_sends_text_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/cards/c1/actions/comments"))
        .and(query_param("text", "Ready for review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a3",
            "type": "commentCard",
            "date": "2024-05-03T10:00:00.000Z",
            "data": { "text": "Ready for review" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let comment = CardService::new(&client)
        .add_comment("c1", "Ready for review")
        .await
        .unwrap();

    assert_eq!(comment.id, "a3");
    assert_eq!(comment.author, None);
}

#[tokio::test]
async fn given_checklist_when_adding_item_then_posts_name_and_checked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/checklists/cl1/checkItems"))
        .and(body_json(json!({ "name": "Write tests", "checked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "i1",
            "name": "Write tests",
            "state": "complete",
            "idChecklist": "cl1",
            "pos": 16384
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let item = ChecklistService::new(&client)
        .add_checkitem("cl1", "Write tests", true, None)
        .await
        .unwrap();

    assert_eq!(item.state, CheckItemState::Complete);
}

#[tokio::test]
async fn given_checklist_update_with_only_name_when_sent_then_omits_position() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/1/checklists/cl1"))
        .and(body_json(json!({ "name": "QA" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cl1", "name": "QA", "idCard": "c1", "checkItems": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let checklist = ChecklistService::new(&client)
        .update_checklist("cl1", Some("QA"), None)
        .await
        .unwrap();

    assert_eq!(checklist.name, "QA");
}

#[tokio::test]
async fn given_checkitem_when_deleted_then_returns_raw_acknowledgement() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/1/checklists/cl1/checkItems/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "limits": {} })))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let ack = ChecklistService::new(&client)
        .delete_checkitem("cl1", "i1")
        .await
        .unwrap();

    assert_eq!(ack, json!({ "limits": {} }));
}

/// **VALUE**: A body that does not match the model is a Model error, not a panic.
#[tokio::test]
async fn given_unexpected_body_when_decoding_then_returns_model_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let err = ListService::new(&client).get_list("l1").await.unwrap_err();

    assert!(matches!(err, CoreError::Model(_)));
    // The location names the service method that decoded, not the shared helper
    let message = err.to_string();
    assert!(message.contains("list.rs"), "{message}");
    assert!(!message.contains("mod.rs"), "{message}");
}

#[tokio::test]
async fn given_api_failure_when_calling_service_then_propagates_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/checklists/cl1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (client, _observer) = client_for(&server);

    let err = ChecklistService::new(&client).get_checklist("cl1").await.unwrap_err();

    match err {
        CoreError::Api(api) => assert_eq!(api.kind(), ApiErrorKind::HttpError),
        other => panic!("expected API error, got {other:?}"),
    }
}
