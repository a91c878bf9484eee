use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use messenger::core::{AppState, MessengerConfig};
use messenger::database::MessengerDatabase;
use messenger::router::init_router;

fn test_config() -> MessengerConfig {
    MessengerConfig {
        server_url: "127.0.0.1".to_string(),
        server_port: 0,
        db_sqlite_file: "unused".to_string(),
        log_level: "debug".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
    }
}

async fn test_app() -> (Router, MessengerDatabase, TempDir) {
    let dir = TempDir::new().unwrap();
    let db_file = dir.path().join("test_messenger.db");
    let db = MessengerDatabase::connect(db_file.to_str().unwrap()).await.unwrap();
    let app = init_router(AppState { env: test_config(), messenger_db: db.clone() });
    (app, db, dir)
}

fn post_messages(chatroom_id: i64, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/chatrooms/{chatroom_id}/messages"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn no_payload_yields_400_with_no_json_input_error() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chatrooms/5/messages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["errors"][0], "No JSON Input Provided.");
}

#[tokio::test]
async fn non_object_payload_yields_400_with_no_json_input_error() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(post_messages(5, Body::from("[1, 2, 3]")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["errors"][0], "No JSON Input Provided.");
}

#[tokio::test]
async fn payload_without_data_yields_400_with_malformed_input_error() {
    let (app, _db, _dir) = test_app().await;

    let response = app.oneshot(post_messages(5, Body::from("{}"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["errors"][0], "Bad Input. Malformed JSON Input.");
}

#[tokio::test]
async fn messages_are_stored_and_ids_returned_in_order() {
    let (app, db, _dir) = test_app().await;

    let payload = json!({
        "data": [
            { "message_str": "hello world!", "message_sent_ts": 1637029263, "sender_user_id": 10 },
            { "message_str": "goodnight earth!", "message_sent_ts": 1637029963, "sender_user_id": 4 },
        ]
    });
    let response = app
        .oneshot(post_messages(5, Body::from(payload.to_string())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, json!({ "data": [{ "message_id": 1 }, { "message_id": 2 }] }));

    let stored = db.select_recent_messages_in_chatroom(5).await.unwrap();
    assert_eq!(stored.len(), 2);
    let expected = [("hello world!", 1637029263i64, 10i64), ("goodnight earth!", 1637029963, 4)];
    for (record, (message_str, sent_ts, sender_user_id)) in stored.iter().zip(expected) {
        assert_eq!(record.chatroom_id, 5);
        assert_eq!(record.message_str, message_str);
        assert_eq!(record.message_sent_ts, sent_ts);
        assert_eq!(record.sender_user_id, sender_user_id);
    }
}

#[tokio::test]
async fn path_chatroom_id_overrides_the_body() {
    let (app, db, _dir) = test_app().await;

    let payload = json!({
        "data": [
            { "chatroom_id": 99, "message_str": "hi", "message_sent_ts": 1637029263, "sender_user_id": 1 },
        ]
    });
    let response = app
        .oneshot(post_messages(7, Body::from(payload.to_string())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = db.select_recent_messages_in_chatroom(7).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(db.select_recent_messages_in_chatroom(99).await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_row_degrades_to_null_without_aborting_the_batch() {
    let (app, db, _dir) = test_app().await;

    sqlx::query(
        "CREATE TRIGGER reject_flagged_sender BEFORE INSERT ON message \
         WHEN NEW.sender_user_id < 0 \
         BEGIN SELECT RAISE(ABORT, 'sender rejected'); END",
    )
    .execute(db.get_connection())
    .await
    .unwrap();

    let payload = json!({
        "data": [
            { "message_str": "first", "message_sent_ts": 1637029263, "sender_user_id": 10 },
            { "message_str": "rejected", "message_sent_ts": 1637029300, "sender_user_id": -1 },
            { "message_str": "third", "message_sent_ts": 1637029963, "sender_user_id": 4 },
        ]
    });
    let response = app
        .oneshot(post_messages(5, Body::from(payload.to_string())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        body,
        json!({ "data": [{ "message_id": 1 }, { "message_id": null }, { "message_id": 2 }] })
    );
}

#[tokio::test]
async fn empty_batch_yields_empty_data() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(post_messages(5, Body::from(json!({ "data": [] }).to_string())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (app, _db, _dir) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
