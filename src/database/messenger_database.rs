use std::collections::HashSet;
use chrono::NaiveDateTime;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, Pool, Sqlite};
use crate::database::schema::{ChatroomTable, MembershipTable, MessageTable, UserTable};

/// One message row as handed to the store; the generated key and the
/// server-assigned timestamp are not the caller's to pick.
#[derive(Debug, Clone)]
pub struct NewMessageRow {
    pub chatroom_id: i64,
    pub sender_user_id: i64,
    pub message_str: String,
    pub message_sent_ts: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MessageRecord {
    pub message_id: i64,
    pub chatroom_id: i64,
    pub sender_user_id: i64,
    pub message_str: String,
    pub message_media: Option<String>,
    pub message_sent_ts: i64,
    pub stored_at_ts: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct MessengerDatabase {
    pool: Pool<Sqlite>,
}

impl MessengerDatabase {

    /// Opens the sqlite file (creating it if absent) and ensures the schema
    /// exists. Table creation respects the foreign-key dependency order:
    /// user and chatroom before message and user2chatroom.
    pub async fn connect(db_file: &str) -> Result<Self, sqlx::Error> {
        // Foreign keys stay declarative on this connection; rows may
        // reference chatrooms and senders that were never inserted.
        let opt = SqliteConnectOptions::new()
            .filename(db_file)
            .create_if_missing(true)
            .foreign_keys(false);
        // sqlite serializes writers at the engine level, one connection is all we use.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opt)
            .await?;
        let db = MessengerDatabase { pool };
        db.create_tables().await?;
        info!("Established connection to the messenger database at '{db_file}'.");
        Ok(db)
    }

    pub fn get_connection(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn create_tables(&self) -> Result<(), sqlx::Error> {
        sqlx::query(UserTable::CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(ChatroomTable::CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(MessageTable::CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(MessageTable::CREATE_INDEX_SQL).execute(&self.pool).await?;
        sqlx::query(MembershipTable::CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_user(&self, user_name: &str, avatar: Option<&str>) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(UserTable::INSERT_USER_SQL)
            .bind(user_name)
            .bind(avatar)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Inserts the chatroom and, when an admin is given, the admin's
    /// membership as one logical operation. A failed chatroom insert leaves
    /// no membership row behind.
    pub async fn insert_chatroom(&self, chatroom_name: &str, admin_user_id: Option<i64>) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(ChatroomTable::INSERT_CHATROOM_SQL)
            .bind(chatroom_name)
            .bind(admin_user_id)
            .execute(&mut *tx)
            .await?;
        let chatroom_id = result.last_insert_rowid();
        if let Some(admin_id) = admin_user_id {
            sqlx::query(MembershipTable::INSERT_MEMBER_SQL)
                .bind(chatroom_id)
                .bind(admin_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(chatroom_id)
    }

    /// Adds one membership row per user id, in the given order. A duplicate
    /// (chatroom_id, user_id) pair violates the composite key and fails the
    /// whole batch, leaving no row of it behind.
    pub async fn add_users_to_chatroom(&self, chatroom_id: i64, user_ids: &[i64]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for user_id in user_ids {
            sqlx::query(MembershipTable::INSERT_MEMBER_SQL)
                .bind(chatroom_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Inserts each message independently and sequentially, returning one
    /// outcome per input row in input order. A failed row does not abort the
    /// remaining insertions; the caller decides how to surface the failure.
    pub async fn insert_message_rows(&self, rows: &[NewMessageRow]) -> Vec<Result<i64, sqlx::Error>> {
        let mut outcomes = Vec::with_capacity(rows.len());
        for row in rows {
            let outcome = sqlx::query(MessageTable::INSERT_MESSAGE_SQL)
                .bind(row.chatroom_id)
                .bind(row.sender_user_id)
                .bind(&row.message_str)
                .bind(row.message_sent_ts)
                .execute(&self.pool)
                .await
                .map(|result| result.last_insert_rowid());
            outcomes.push(outcome);
        }
        outcomes
    }

    pub async fn select_users_in_chatroom(&self, chatroom_id: i64) -> Result<HashSet<i64>, sqlx::Error> {
        let user_ids: Vec<i64> = sqlx::query_scalar(MembershipTable::ALL_USERS_IN_CHATROOM_SQL)
            .bind(chatroom_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(user_ids.into_iter().collect())
    }

    /// Messages stored in the chatroom over the last 30 days, oldest first,
    /// capped at 100 rows.
    pub async fn select_recent_messages_in_chatroom(&self, chatroom_id: i64) -> Result<Vec<MessageRecord>, sqlx::Error> {
        let messages = sqlx::query_as::<_, MessageRecord>(MessageTable::RECENT_MESSAGES_IN_CHATROOM_SQL)
            .bind(chatroom_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }
}
