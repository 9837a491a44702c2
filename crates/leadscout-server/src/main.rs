mod api;
mod middleware;

use std::{net::SocketAddr, sync::Arc};

use axum::http::HeaderValue;
use leadscout_places::{PlacesClient, PlacesConfig};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let places = PlacesClient::new(PlacesConfig::from_app_config(&config))?;
    let cors_origin = HeaderValue::from_str(&config.frontend_url)?;
    let rate_limit = RateLimitState::per_minute(config.rate_limit_per_minute);

    let app = build_app(
        AppState {
            places: Arc::new(places),
        },
        cors_origin,
        rate_limit,
    );

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting leadscout-server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
