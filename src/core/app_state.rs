use crate::core::MessengerConfig;
use crate::database::MessengerDatabase;

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: MessengerConfig,
    pub messenger_db: MessengerDatabase,
}
