pub mod core;
pub mod database;
pub mod errors;
pub mod messaging;
pub mod router;
