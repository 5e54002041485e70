//! HTTP surface for the chauffeur booking backend.
//!
//! Routes:
//! - `POST /api/quotes`: de-duplicated quote capture
//! - `POST /api/send-email`: client confirmation and admin notification
//! - `POST /api/reservas`: reservation acknowledgement
//! - `POST /api/reservations`: confirm by email, then record the quote
//! - `GET /health`

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ServerError};
pub use state::AppState;

use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use chauffeur_rs_config::ChauffeurConfig;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/quotes", post(routes::submit_quote))
        .route("/api/send-email", post(routes::send_email))
        .route("/api/reservas", post(routes::acknowledge_reservation))
        .route("/api/reservations", post(routes::submit_reservation))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &ChauffeurConfig) -> Result<(), ServerError> {
    let address = config.server.socket_addr()?;
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    info!("binding listener (address={address})");
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;
    info!("server running (address={address})");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(err) => {
                error!("failed to install Ctrl+C handler (error={err})");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                error!("failed to install SIGTERM handler (error={err})");
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
}
