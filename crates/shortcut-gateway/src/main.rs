use anyhow::Context;
use clap::Parser;
use shortcut_gateway::app::RESERVED_CODES;
use shortcut_gateway::{telemetry, App, AppState, Cli};
use shortcut_generator::RandomGenerator;
use shortcut_shortener::ShortenerService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    let generator = RandomGenerator::with_length(cli.code_length)
        .with_context(|| format!("invalid short code length {}", cli.code_length))?;

    let selection = cli.storage_settings().selection();
    let backend = selection.backend();
    let store = shortcut_storage::connect(selection)
        .await
        .with_context(|| format!("failed to connect to the {backend} backend"))?;

    let service = ShortenerService::with_policy(store, generator, cli.collision_policy())
        .with_reserved(RESERVED_CODES.iter().copied());
    let state = AppState::new(Arc::new(service), cli.public_base_url.clone());

    let listener = TcpListener::bind(cli.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr()))?;
    info!(
        listen_addr = %listener.local_addr()?,
        backend = %backend,
        "starting shortcut server"
    );

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
