use axum::serve;
use bridge_gallery::config::AppConfig;
use bridge_gallery::{build_app, HttpStore};
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging, quiet the HTTP client internals
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();

    info!("Bridge gallery: related imagery for tapped map bridges");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: server={}:{}, overpass={}, sparql={}",
        config.server.host, config.server.port, config.endpoints.overpass, config.endpoints.sparql
    );

    let store = HttpStore::new(&config.endpoints)?;
    let app = build_app(store, config.languages());

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
