use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use roomgate_api::{AppStateInner, Config, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomgate=debug,roomgate_api=debug,roomgate_db=info,tower_http=debug".into()),
        )
        .init();

    // Config
    let config = Config::from_env()?;
    if config.uses_dev_credentials() {
        warn!("LIVEKIT_API_KEY/LIVEKIT_API_SECRET are the development defaults; tokens will not be accepted by a production media server");
    }

    // Init database
    let db = roomgate_db::Database::open(&config.db_path)?;

    let issuer = config.token_issuer();
    info!("Token TTL: {} seconds", issuer.ttl().as_secs());

    let state = Arc::new(AppStateInner { db, issuer });

    let app = build_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Roomgate token server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
