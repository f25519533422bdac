use std::{net::SocketAddr, process};

use quotecard_server::{build_state, config, error::ServerError, http, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        if tracing::dispatcher::has_been_set() {
            error!(error = %err, "server error");
        } else {
            eprintln!("quotecard-server: {err}");
        }
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let (_cli, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let state = build_state(&settings)?;
    info!(
        primary_font = %state.compositor.fonts().primary.describe(),
        author_font = %state.compositor.fonts().secondary.describe(),
        output = %settings.output.directory.display(),
        quota = settings.quota.limit.get(),
        "renderer ready"
    );

    let listener = tokio::net::TcpListener::bind(settings.server.addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    let app = http::router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
