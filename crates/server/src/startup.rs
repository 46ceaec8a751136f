use std::sync::Arc;

use axum::Router;
use common::ActiveProfiles;
use configs::AppConfig;
use service::client::{FallbackPolicy, MovieCardsClient};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the shared moviecards-service client into the handler state.
///
/// The fallback policy is fixed here, once, from the active profiles.
pub fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let profiles = ActiveProfiles::resolve(&cfg.profiles.active);
    let policy = FallbackPolicy::from_profiles(&profiles);
    if policy.substitutes() {
        warn!(profiles = ?profiles.names(), "test profile active: failed remote calls return placeholder values");
    }
    let client = MovieCardsClient::from_config(&cfg.moviecards, policy)
        .map_err(|e| StartupError::Runtime(format!("cannot build http client: {e}")))?;
    info!(
        service_url = %client.base_url(),
        timeout_ms = ?cfg.moviecards.timeout_ms,
        ?policy,
        "moviecards-service client ready"
    );
    Ok(AppState::new(Arc::new(client)))
}

pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app from a loaded config and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;

    let addr = cfg.server.bind_addr()?;
    info!(%addr, "starting moviecards web server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
