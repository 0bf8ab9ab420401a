//! The HTTP proxy sitting between clients and the Roblox API.

mod error;
mod extract;
mod routes;
mod state;

pub use error::ApiError;
pub use extract::RobloxCookie;
pub use state::AppState;

use crate::{api::COOKIE_HEADER, Config};
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::io;
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;

/// Build the proxy's routes.
pub fn router(config: &Config, state: AppState) -> Router {
    Router::new()
        .route("/api/user-info", post(routes::user_info))
        .route("/api/friends", post(routes::friends_list))
        .route("/api/unfriend", post(routes::unfriend))
        .route("/api/batch-unfriend", post(routes::batch_unfriend))
        .route("/health", get(routes::health))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(cors(config))
        .with_state(state)
}

/// Run the proxy until it receives Ctrl+C or `SIGTERM`.
pub async fn serve(config: Config) -> Result<(), ServerError> {
    let state = AppState::new(&config)?;
    let app = router(&config, state);

    let address = config.address();
    log::debug!("Binding to {}", address);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    log::info!("Allyst proxy running on {}", listener.local_addr()?);
    log::info!("Environment: {:?}", config.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shutting down...");

    Ok(())
}

fn cors(config: &Config) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::permissive();
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(COOKIE_HEADER)])
        .allow_credentials(true);

    match config.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(_)) => {
            log::warn!("The frontend URL isn't a valid origin, cross-origin requests will be rejected");
            layer
        },
        None => {
            log::warn!("No frontend URL configured, cross-origin requests will be rejected");
            layer
        },
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!("Unable to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log::info!("Received terminate signal, shutting down");
            },
            Err(e) => {
                log::error!("Unable to install the SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Errors that can stop the proxy from running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Unable to create the HTTP client")]
    HttpClient(#[from] reqwest::Error),
    #[error("Unable to bind to {address}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("The server encountered an IO error")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Environment, endpoints::Hosts};
    use reqwest::Client;
    use tokio::net::TcpListener;

    async fn preflight(config: Config, origin: &str) -> reqwest::Response {
        let state = AppState::new(&config).unwrap();
        let app = router(&config, state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Client::new()
            .request(
                reqwest::Method::OPTIONS,
                format!("http://{}/api/friends", address),
            )
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", COOKIE_HEADER)
            .send()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn production_only_allows_the_frontend() {
        let config = Config {
            environment: Environment::Production,
            frontend_url: Some(String::from("https://allyst.example.com")),
            ..Config::for_testing(Hosts::default())
        };

        let allowed =
            preflight(config.clone(), "https://allyst.example.com").await;
        let denied = preflight(config, "https://evil.example.com").await;

        assert_eq!(
            allowed.headers()["access-control-allow-origin"],
            "https://allyst.example.com"
        );
        assert!(denied.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn development_allows_anyone() {
        let config = Config::for_testing(Hosts::default());

        let response = preflight(config, "http://localhost:5173").await;

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
