mod schema;
mod messenger_database;

pub use schema::{ChatroomTable, MembershipTable, MessageTable, UserTable};
pub use messenger_database::{MessageRecord, MessengerDatabase, NewMessageRow};
