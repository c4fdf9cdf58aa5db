use backend::api;

use std::net::SocketAddr;
use stockfish_uci::UciEngine;
use tokio::net::TcpListener;

/// How far above the preferred port to probe before giving up.
const PORT_PROBE_RANGE: u16 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    dotenv::dotenv().ok();

    let engine_path =
        std::env::var("STOCKFISH_PATH").unwrap_or_else(|_| "stockfish".to_string());
    let engine = UciEngine::spawn(&engine_path).await?;
    tracing::info!(%engine_path, "engine process ready");

    let preferred_port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let app = api::router(engine);
    let listener = bind_available(preferred_port).await?;
    tracing::info!("chessbot API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind the first free port at or above `preferred_port`.
async fn bind_available(preferred_port: u16) -> anyhow::Result<TcpListener> {
    let end = preferred_port.saturating_add(PORT_PROBE_RANGE);
    for port in preferred_port..end {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::warn!(port, "port in use, trying the next one");
            }
            Err(e) => return Err(e.into()),
        }
    }
    anyhow::bail!("no free port in {preferred_port}..{end}")
}
