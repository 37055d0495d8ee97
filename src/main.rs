//! PoemWalk - Walking Game Client Engine
//!
//! Main entry point: plays rounds headlessly against a graph server.
//!
//! Environment:
//! - `POEMWALK_CONFIG`: config file path (default: platform data dir)
//! - `POEMWALK_ROUNDS`: rounds to play (default 1)
//! - `POEMWALK_REALTIME`: set to animate at wall-clock speed

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PoemWalk v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::var_os("POEMWALK_CONFIG").map(PathBuf::from);
    let rounds = std::env::var("POEMWALK_ROUNDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let realtime = std::env::var_os("POEMWALK_REALTIME").is_some();

    let mut app = app::WalkApp::new(config_path.as_deref(), realtime)?;
    app.run(rounds).await
}
