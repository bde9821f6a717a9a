use std::net::SocketAddr;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studytrack::interface::{ConsoleInterface, ControlInterface, HttpInterface};
use studytrack::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "studytrack=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://studytrack.db".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let interface: Box<dyn ControlInterface> =
        match std::env::var("STUDYTRACK_INTERFACE").as_deref() {
            Ok("console") => Box::new(ConsoleInterface::new(pool.clone())),
            _ => {
                let state = AppState { db: pool.clone() };
                let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
                Box::new(HttpInterface::new(state, addr))
            }
        };

    interface.run().await?;

    Ok(())
}
