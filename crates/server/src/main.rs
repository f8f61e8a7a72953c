//! EcoExplore authority server.
//!
//! Composition root: loads configuration, sets up logging, starts the runtime
//! and serves it over the stdio transport.
//!
//! ```bash
//! ECO_SEED=7 RUST_LOG=runtime=debug cargo run -p eco-server
//! ```

mod config;
mod logging;
mod transport;

use anyhow::Result;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting EcoExplore server");
    match config.seed {
        Some(seed) => tracing::info!("World seed: {}", seed),
        None => tracing::info!("World seed: random"),
    }

    let runtime = runtime::Runtime::start(config.runtime_config());

    tokio::select! {
        result = transport::serve_stdio(runtime.handle()) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    runtime.shutdown().await?;
    tracing::info!("Server stopped");
    Ok(())
}
