use serde::{Deserialize, Serialize};

/// One message as submitted by the client. The chatroom comes from the
/// request path, never from the body.
#[derive(Debug, Deserialize, Clone)]
pub struct IncomingMessage {
    pub message_str: String,
    /// Client-supplied send time, stored as received.
    pub message_sent_ts: i64,
    pub sender_user_id: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct StoredMessageId {
    /// Generated identifier, or null when the row failed to insert.
    pub message_id: Option<i64>,
}

#[derive(Debug, Serialize, Clone)]
pub struct StoreMessagesResponse {
    pub data: Vec<StoredMessageId>,
}
