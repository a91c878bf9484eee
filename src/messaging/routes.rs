use std::sync::Arc;
use axum::Router;
use axum::routing::post;
use crate::core::AppState;
use crate::messaging::handler::handle_store_messages;

pub fn create_messaging_routes() -> Router<Arc<AppState>> {
    Router::new() //add new routes here
        .route("/chatrooms/{chatroom_id}/messages", post(handle_store_messages))
}
