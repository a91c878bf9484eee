use std::sync::Arc;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde_json::Value;
use tracing::{debug, error};
use crate::core::AppState;
use crate::database::NewMessageRow;
use crate::errors::ApiError;
use crate::messaging::model::{IncomingMessage, StoredMessageId, StoreMessagesResponse};

/// Stores a batch of messages on the given chatroom.
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// the two malformation cases keep their distinct error messages.
pub async fn handle_store_messages(
    State(state): State<Arc<AppState>>,
    Path(chatroom_id): Path<i64>,
    body: Bytes,
) -> Result<Json<StoreMessagesResponse>, ApiError> {
    debug!("chatroom_id: {chatroom_id}");

    let payload: Value = serde_json::from_slice(&body).map_err(|_| ApiError::NoJsonInput)?;
    let Value::Object(mut payload) = payload else {
        return Err(ApiError::NoJsonInput);
    };
    debug!("JSON payload: {payload:?}");

    let data = payload.remove("data").ok_or(ApiError::MalformedJsonInput)?;
    let messages: Vec<IncomingMessage> =
        serde_json::from_value(data).map_err(|_| ApiError::MalformedJsonInput)?;

    let rows: Vec<NewMessageRow> = messages
        .into_iter()
        .map(|msg| NewMessageRow {
            chatroom_id,
            sender_user_id: msg.sender_user_id,
            message_str: msg.message_str,
            message_sent_ts: msg.message_sent_ts,
        })
        .collect();

    let data = state
        .messenger_db
        .insert_message_rows(&rows)
        .await
        .into_iter()
        .map(|outcome| StoredMessageId {
            message_id: match outcome {
                Ok(message_id) => Some(message_id),
                Err(err) => {
                    // Lenient batch contract: the bad row degrades to null,
                    // the rest of the batch goes through.
                    error!("Failed to insert message row into chatroom {chatroom_id}: {err}");
                    None
                }
            },
        })
        .collect();

    Ok(Json(StoreMessagesResponse { data }))
}
