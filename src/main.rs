mod api;
mod config;
mod core;
mod db;
mod middleware;

use config::AppConfig;
use poem::{listener::TcpListener, Server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly
    dotenvy::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "INFO");
    }
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let store = db::build_store(&config.storage).await;
    let app = api::app(store);

    info!(addr = %config.bind_addr, "listening");
    Server::new(TcpListener::bind(config.bind_addr))
        .run(app)
        .await?;

    Ok(())
}
