use std::sync::Arc;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::core::AppState;
use crate::messaging::routes::create_messaging_routes;

/**
 * Initializing the api routes.
 */
pub fn init_router(app_state: AppState) -> Router {
    let origin = app_state.env.cors_origin.clone();
    let cors = CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>().unwrap())
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    let public_routing = Router::new()
        .route("/", get(|| async { "Hello, world! I'm your messenger backend. 🤗" }))
        .route("/health", get(|| async { (StatusCode::OK, "Healthy").into_response() }));

    let api_routing = Router::new() //add new routes here
        .merge(create_messaging_routes())
        //layering bottom to top middleware
        .layer(
            ServiceBuilder::new() //layering top to bottom middleware
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(5 * 1024 * 1024)) //max 5mb payloads
        )
        .with_state(Arc::new(app_state));
    public_routing.merge(api_routing)
}
