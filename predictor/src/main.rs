use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use tokio::{net::TcpListener, signal};

use predictor::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;

    let state = AppState::from_artifact(&config.model_path).with_context(|| {
        format!(
            "cannot serve the artifact at {}",
            config.model_path.display()
        )
    })?;
    info!("loaded {}", state.pipeline());

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    axum::serve(listener, predictor::router(state))
        .with_graceful_shutdown(async {
            if signal::ctrl_c().await.is_ok() {
                info!("received interrupt, shutting down");
            }
        })
        .await?;

    info!("wrapping up...");
    Ok(())
}
