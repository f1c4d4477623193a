pub mod config;
pub mod post;
pub mod server;
pub mod trace;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

use std::net::SocketAddr;
use std::sync::Arc;

use config::AppConfig;
use post::{Poster, TelegramPoster};
use tokio::signal;
use trace::init_tracing;
use tracing::{error, info};

pub async fn run() -> Result<(), BoxError> {
    init_tracing();

    // Missing credentials degrade the poster to a logging no-op; the HTTP
    // surface (webhook ack, /health) keeps working either way.
    let cfg = AppConfig::from_env();

    info!("Starting autopost bot on port {}", cfg.port);

    let poster: Arc<dyn Poster> = Arc::new(TelegramPoster::from_config(&cfg));
    let state = server::AppState {
        cron_secret: cfg.cron_secret.clone(),
        poster,
    };
    let app = server::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    server.await?;

    info!("Bot shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl = signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut term_stream =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(err) => {
                    error!("Failed to register SIGTERM handler: {}", err);
                    ctrl.await.expect("ctrl_c failed");
                    return;
                }
            };

        tokio::select! {
            _ = ctrl => {},
            _ = term_stream.recv() => {},
        }
        info!("Shutdown signal received (SIGINT/SIGTERM). Stopping server.");
    }
    #[cfg(not(unix))]
    {
        ctrl.await.expect("ctrl_c failed");
        info!("Shutdown signal received (SIGINT). Stopping server.");
    }
}
