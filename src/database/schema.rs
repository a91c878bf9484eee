//! Per-table SQL constant holders. One unit struct per entity, owning the DDL
//! and the parameterized statements against it; no behavior beyond that.
//!
//! The foreign-key clauses are declarative referential-integrity rules. The
//! store connection does not turn on sqlite foreign-key enforcement, so the
//! cascades fire only for deletions performed through a connection that does.

pub struct UserTable;

impl UserTable {
    pub const TABLE_NAME: &'static str = "user";

    pub const CREATE_TABLE_SQL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS user(
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_name VARCHAR(50) NOT NULL,
            avatar VARCHAR(256),
            created_ts TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );"#;

    pub const INSERT_USER_SQL: &'static str = "INSERT INTO user(user_name, avatar) VALUES (?, ?)";
}

pub struct ChatroomTable;

impl ChatroomTable {
    pub const TABLE_NAME: &'static str = "chatroom";

    pub const CREATE_TABLE_SQL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS chatroom(
            chatroom_id INTEGER PRIMARY KEY AUTOINCREMENT,
            chatroom_name VARCHAR(100) NOT NULL,
            admin_user_id INTEGER,
            created_ts TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (admin_user_id) REFERENCES user (user_id)
                    ON UPDATE NO ACTION
        );"#;

    pub const INSERT_CHATROOM_SQL: &'static str =
        "INSERT INTO chatroom(chatroom_name, admin_user_id) VALUES (?, ?)";
}

pub struct MessageTable;

impl MessageTable {
    pub const TABLE_NAME: &'static str = "message";

    pub const CREATE_TABLE_SQL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS message(
            message_id INTEGER PRIMARY KEY AUTOINCREMENT,
            chatroom_id INTEGER NOT NULL,
            sender_user_id INTEGER NOT NULL,
            message_str LONGTEXT NOT NULL,
            message_media VARCHAR(256),
            message_sent_ts TIMESTAMP NOT NULL,
            stored_at_ts TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (chatroom_id) REFERENCES chatroom (chatroom_id)
                    ON DELETE CASCADE ON UPDATE NO ACTION,
            FOREIGN KEY (sender_user_id) REFERENCES user (user_id)
                    ON UPDATE NO ACTION
        );"#;

    pub const CREATE_INDEX_SQL: &'static str = r#"
        CREATE INDEX IF NOT EXISTS idx_messages_stored_at_ts
            ON message (stored_at_ts);"#;

    pub const INSERT_MESSAGE_SQL: &'static str = r#"
        INSERT INTO message (chatroom_id, sender_user_id, message_str, message_sent_ts)
            VALUES (?, ?, ?, ?)"#;

    /// Recency-bounded scan over the stored_at_ts index.
    pub const RECENT_MESSAGES_IN_CHATROOM_SQL: &'static str = r#"
        SELECT message_id, chatroom_id, sender_user_id, message_str, message_media, message_sent_ts, stored_at_ts
            FROM message
            WHERE chatroom_id = ? AND
                  stored_at_ts > datetime('now', '-30 days')
            ORDER BY stored_at_ts, message_id
            LIMIT 100"#;
}

pub struct MembershipTable;

impl MembershipTable {
    pub const TABLE_NAME: &'static str = "user2chatroom";

    pub const CREATE_TABLE_SQL: &'static str = r#"
        CREATE TABLE IF NOT EXISTS user2chatroom(
            chatroom_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (chatroom_id, user_id),
            FOREIGN KEY (chatroom_id) REFERENCES chatroom (chatroom_id)
                    ON DELETE CASCADE ON UPDATE NO ACTION,
            FOREIGN KEY (user_id) REFERENCES user (user_id)
                    ON DELETE CASCADE ON UPDATE NO ACTION
        );"#;

    pub const INSERT_MEMBER_SQL: &'static str =
        "INSERT INTO user2chatroom(chatroom_id, user_id) VALUES (?, ?)";

    pub const ALL_USERS_IN_CHATROOM_SQL: &'static str =
        "SELECT user_id FROM user2chatroom WHERE chatroom_id = ?";
}
