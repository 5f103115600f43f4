//! ytmate HTTP server
//!
//! Exposes [`ytmate_core::YtMate`] over a small JSON API:
//!
//! - `POST /api/analyze` with `{ "url": "..." }`
//! - `POST /api/convert` with the `conversion_params` of one option
//! - `GET /api/health`
//! - `GET /` for an endpoint index
//!
//! Anything else, including a known path with the wrong method, answers
//! 404 with the list of available endpoints.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use url::Url;
use ytmate_core::YtMate;

pub mod config;
pub mod error;
pub mod handlers;

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared handler state
///
/// `YtMate` only wraps a pooled HTTP client, so cloning it per request
/// is cheap and nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub proxy: YtMate,
}

/// Build the router with all routes, CORS and request tracing
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/convert", post(handlers::convert))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer
///
/// With no configured origins any origin is allowed. Otherwise only the
/// listed origins (normalized to `scheme://host[:port]`) pass.
///
/// # Errors
/// Returns an error naming the first origin that is not a valid
/// `http`/`https` origin
pub fn build_cors_layer(origins: &[String]) -> Result<CorsLayer, ApiError> {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        warn!("ALLOWED_ORIGINS is not set; accepting requests from any origin.");
        return Ok(base.allow_origin(Any));
    }

    let normalized_origins = origins
        .iter()
        .map(|origin| {
            normalize_origin(origin).ok_or_else(|| {
                ApiError::internal(format!(
                    "Invalid origin in ALLOWED_ORIGINS: {origin}. Use values like https://example.com"
                ))
            })
        })
        .collect::<Result<HashSet<_>, _>>()?;
    info!(
        "CORS allow-list loaded with {} origin(s): {:?}",
        normalized_origins.len(),
        normalized_origins
    );

    let allowed_origins = Arc::new(normalized_origins);
    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let normalized = origin.to_str().ok().and_then(normalize_origin);
        let allowed = normalized
            .as_ref()
            .is_some_and(|value| allowed_origins.contains(value));
        debug!(?origin, ?normalized, allowed, "CORS origin check");
        allowed
    });

    Ok(base.allow_origin(allow_origin))
}

/// Reduce an origin to `scheme://host[:port]`, dropping default ports
fn normalize_origin(value: &str) -> Option<String> {
    let parsed = Url::parse(value).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let scheme = parsed.scheme();
    let default_port = match scheme {
        "http" => 80,
        "https" => 443,
        _ => return None,
    };

    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        return None;
    }

    match parsed.port() {
        Some(port) if port != default_port => Some(format!("{scheme}://{host}:{port}")),
        _ => Some(format!("{scheme}://{host}")),
    }
}

/// Bind and serve until the process is stopped
///
/// # Errors
/// Fails if the HTTP client, CORS layer or listener cannot be set up, or
/// if the server stops with an I/O error
pub async fn run(config: ServerConfig) -> Result<(), ApiError> {
    let proxy = YtMate::with_config(config.client)
        .map_err(|error| ApiError::internal(format!("Could not build HTTP client: {error}")))?;
    info!("Forwarding to upstream {}", proxy.base_url());

    let cors = build_cors_layer(&config.allowed_origins)?;
    let app = build_router(AppState { proxy }, cors);

    let addr = config.bind_addr;
    let listener = TcpListener::bind(&addr).await.map_err(|error| {
        ApiError::internal(format!("Could not bind {addr}: {error}"))
    })?;

    info!("YouTube Downloader API listening on http://{addr}");
    info!("Health check: http://{addr}/api/health");
    info!("API root: http://{addr}/");

    axum::serve(listener, app)
        .await
        .map_err(|error| ApiError::internal(format!("HTTP server error: {error}")))
}
