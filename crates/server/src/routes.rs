use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{actor::ActorService, client::MovieCardsApi, movie::MovieService};

pub mod actors;
pub mod movies;

/// Shared handler state: the domain services, both backed by one client.
#[derive(Clone)]
pub struct AppState {
    pub movies: MovieService,
    pub actors: ActorService,
}

impl AppState {
    pub fn new(api: Arc<dyn MovieCardsApi>) -> Self {
        Self {
            movies: MovieService::new(Arc::clone(&api)),
            actors: ActorService::new(api),
        }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    service::observability::encode_metrics()
}

/// Build the full application router: HTML pages, health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let pages = Router::new()
        .route("/", get(|| async { Redirect::to("/movies") }))
        .route("/movies", get(movies::list))
        .route("/movies/new", get(movies::new_form))
        .route("/saveMovie", post(movies::save))
        .route("/editMovie/:movie_id", get(movies::edit))
        .route("/registerActor", post(movies::register_actor))
        .route("/actors", get(actors::list))
        .route("/actors/new", get(actors::new_form))
        .route("/saveActor", post(actors::save))
        .route("/editActor/:actor_id", get(actors::edit));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    pages
        .merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged as errors
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
