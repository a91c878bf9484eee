use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct MessengerConfig {
    pub server_url: String,
    pub server_port: u16,
    /// Path to the sqlite file backing the store, `MESSENGER_DB_SQLITE_FILE` in the environment.
    pub db_sqlite_file: String,
    pub log_level: String,
    pub cors_origin: String,
}

impl MessengerConfig {
    pub fn new_config() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server_url", "127.0.0.1")?
            .set_default("server_port", 8080_i64)?
            .set_default("db_sqlite_file", "messenger_app.db")?
            .set_default("log_level", "info")?
            .set_default("cors_origin", "http://localhost:3000")?
            .add_source(File::with_name("messenger.config.toml").required(false))
            .add_source(Environment::with_prefix("MESSENGER"))
            .build()?;
        config.try_deserialize()
    }
}
