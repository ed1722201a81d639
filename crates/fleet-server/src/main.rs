use anyhow::Result;
use clap::Parser;
use infrastructure::config::DatabaseConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_server::{api, state::AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// API Port
    #[arg(long, default_value = "8080")]
    api_port: u16,

    /// Directory served under /static (logo uploads land here)
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info,fleet_server=debug"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("🚢 Fleet Report Server Starting...");

    // 0. Connect to Database
    let db = DatabaseConfig::from_env()?;
    info!("Connecting to database...");
    let pool = db.connect().await?;

    // 0.1 Run Migrations
    info!("Running database migrations...");
    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("✅ Migrations applied successfully");

    // 1. Initialize State
    let state = Arc::new(AppState::new(pool, args.static_dir));

    // 2. Start API Server
    let app = api::create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.api_port));
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
