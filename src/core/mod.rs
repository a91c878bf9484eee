mod config;
mod app_state;

pub use config::MessengerConfig;
pub use app_state::*;
