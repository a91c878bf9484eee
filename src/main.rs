use axum::Router;
use dotenv::dotenv;
use log::info;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use messenger::core::{AppState, MessengerConfig};
use messenger::database::MessengerDatabase;
use messenger::router::init_router;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    dotenv().ok();
    let config = MessengerConfig::new_config().unwrap_or_else(|err| panic!("Invalid configuration: {}", err));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("Starting messenger backend.");

    let messenger_db = MessengerDatabase::connect(&config.db_sqlite_file)
        .await
        .unwrap_or_else(|err| panic!("Failed to open the messenger database '{}': {}", config.db_sqlite_file, err));

    let url = format!("{}:{}", config.server_url, config.server_port);
    let app: Router = init_router(AppState { env: config, messenger_db });
    let listener = TcpListener::bind(url.clone()).await.unwrap();
    info!("Server is listening on: {url}");
    axum::serve(listener, app).await.unwrap();
    info!("Stopping messenger backend...");
}
