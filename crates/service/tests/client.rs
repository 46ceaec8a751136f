use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use models::{Actor, Movie};
use serde_json::{json, Value};
use service::client::{FallbackPolicy, LinkOutcome, MovieCardsApi, MovieCardsClient};
use tokio::net::TcpListener;

type Hits = Arc<Mutex<Vec<String>>>;

async fn record_hit(State(hits): State<Hits>, req: Request, next: Next) -> Response {
    hits.lock().unwrap().push(format!("{} {}", req.method(), req.uri().path()));
    next.run(req).await
}

async fn get_movie(Path(id): Path<i32>) -> Response {
    match id {
        404 => (StatusCode::NOT_FOUND, "no such movie").into_response(),
        666 => (StatusCode::OK, "definitely not json").into_response(),
        _ => Json(json!({
            "id": id,
            "title": "Refreshed",
            "actors": [{"id": 5, "name": "Sigourney Weaver"}]
        }))
        .into_response(),
    }
}

async fn put_movie(Path(id): Path<i32>) -> Response {
    if id == 13 {
        (StatusCode::INTERNAL_SERVER_ERROR, "db down").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn link(Path((_movie_id, actor_id)): Path<(i32, i32)>) -> Response {
    match actor_id {
        99 => StatusCode::ACCEPTED.into_response(),
        404 => (StatusCode::NOT_FOUND, "unknown actor").into_response(),
        _ => (StatusCode::OK, "linked").into_response(),
    }
}

/// Stand-in for moviecards-service, mounted under `/api` like the real one.
async fn spawn_stub() -> anyhow::Result<(String, Hits)> {
    let hits: Hits = Arc::default();
    let app = Router::new()
        .route(
            "/api/movies",
            get(|| async { Json(json!([{"id": 1, "title": "Alien", "synopsis": null, "actors": null}, {"id": 2, "title": "Heat"}])) }).post(
                |Json(mut body): Json<Value>| async move {
                    body["id"] = json!(42);
                    (StatusCode::CREATED, Json(body))
                },
            ),
        )
        .route("/api/movies/:id", get(get_movie).put(put_movie))
        .route("/api/movies/:movie_id/actors/:actor_id", post(link))
        .route("/api/actors", get(|| async { StatusCode::OK }).post(|| async { StatusCode::CREATED }))
        .route("/api/actors/:id", get(|| async { StatusCode::OK }).put(|| async { StatusCode::OK }))
        .layer(middleware::from_fn_with_state(hits.clone(), record_hit));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("stub server error: {}", e);
        }
    });
    Ok((format!("http://{}/api", addr), hits))
}

/// A base URL nothing listens on.
fn unreachable_base() -> anyhow::Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/api", addr))
}

fn client(base: &str, policy: FallbackPolicy) -> MovieCardsClient {
    MovieCardsClient::new(reqwest::Client::new(), base, policy)
}

fn hits_of(hits: &Hits) -> Vec<String> {
    hits.lock().unwrap().clone()
}

#[tokio::test]
async fn list_movies_decodes_the_body() -> anyhow::Result<()> {
    let (base, hits) = spawn_stub().await?;
    let movies = client(&base, FallbackPolicy::Propagate).list_movies().await?;
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[1].title, "Heat");
    assert_eq!(movies[0].synopsis, "");
    assert!(movies[0].actors.is_empty());
    assert_eq!(hits_of(&hits), vec!["GET /api/movies".to_string()]);
    Ok(())
}

#[tokio::test]
async fn absent_bodies_become_empty_values() -> anyhow::Result<()> {
    let (base, _hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    assert!(c.list_actors().await?.is_empty());
    assert!(c.get_actor(3).await?.is_none());

    let submitted = Actor { name: "Bruno Ganz".into(), ..Default::default() };
    let created = c.create_actor(submitted.clone()).await?;
    assert_eq!(created, submitted);
    Ok(())
}

#[tokio::test]
async fn get_and_create_movie() -> anyhow::Result<()> {
    let (base, hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    let found = c.get_movie(8).await?.expect("movie body");
    assert_eq!(found.id, Some(8));
    assert_eq!(found.actors[0].name, "Sigourney Weaver");

    let created = c.create_movie(Movie { title: "Brazil".into(), ..Default::default() }).await?;
    assert_eq!(created.id, Some(42));
    assert_eq!(created.title, "Brazil");

    assert_eq!(hits_of(&hits), vec!["GET /api/movies/8".to_string(), "POST /api/movies".to_string()]);
    Ok(())
}

#[tokio::test]
async fn update_movie_puts_then_refetches() -> anyhow::Result<()> {
    let (base, hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    let updated = c.update_movie(3, Movie { title: "Local edit".into(), ..Default::default() }).await?;
    assert_eq!(updated.id, Some(3));
    assert_eq!(updated.title, "Refreshed");
    assert_eq!(hits_of(&hits), vec!["PUT /api/movies/3".to_string(), "GET /api/movies/3".to_string()]);
    Ok(())
}

#[tokio::test]
async fn update_actor_without_refetch_body_keeps_submission() -> anyhow::Result<()> {
    let (base, hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    let updated = c.update_actor(4, Actor { name: "Liv Ullmann".into(), ..Default::default() }).await?;
    assert_eq!(updated.id, Some(4));
    assert_eq!(updated.name, "Liv Ullmann");
    assert_eq!(hits_of(&hits), vec!["PUT /api/actors/4".to_string(), "GET /api/actors/4".to_string()]);
    Ok(())
}

#[tokio::test]
async fn link_succeeds_only_on_ok() -> anyhow::Result<()> {
    let (base, hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    assert_eq!(c.link_actor_to_movie(1, 5).await?, LinkOutcome::Success);
    assert_eq!(c.link_actor_to_movie(1, 99).await?, LinkOutcome::Failure);
    assert_eq!(c.link_actor_to_movie(1, 404).await?, LinkOutcome::Failure);
    assert_eq!(hits_of(&hits)[0], "POST /api/movies/1/actors/5");
    Ok(())
}

#[tokio::test]
async fn http_errors_carry_status_body_and_url() -> anyhow::Result<()> {
    let (base, _hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    let err = c.get_movie(404).await.unwrap_err();
    assert_eq!(err.url, format!("{base}/movies/404"));
    assert_eq!(err.status, Some(404));
    assert_eq!(err.body.as_deref(), Some("no such movie"));
    Ok(())
}

#[tokio::test]
async fn failed_put_skips_the_refetch() -> anyhow::Result<()> {
    let (base, hits) = spawn_stub().await?;
    let c = client(&base, FallbackPolicy::Propagate);

    let err = c.update_movie(13, Movie::default()).await.unwrap_err();
    assert_eq!(err.status, Some(500));
    assert_eq!(err.body.as_deref(), Some("db down"));
    assert_eq!(hits_of(&hits), vec!["PUT /api/movies/13".to_string()]);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_transport_error() -> anyhow::Result<()> {
    let (base, _hits) = spawn_stub().await?;
    let err = client(&base, FallbackPolicy::Propagate).get_movie(666).await.unwrap_err();
    assert_eq!(err.status, None);
    assert!(err.cause.is_some());
    assert!(err.url.ends_with("/movies/666"));
    Ok(())
}

#[tokio::test]
async fn unreachable_service_propagates_with_url() -> anyhow::Result<()> {
    let base = unreachable_base()?;
    let c = client(&base, FallbackPolicy::Propagate);

    let err = c.list_movies().await.unwrap_err();
    assert_eq!(err.url, format!("{base}/movies"));
    assert!(!err.is_http());

    let err = c.link_actor_to_movie(2, 3).await.unwrap_err();
    assert_eq!(err.url, format!("{base}/movies/2/actors/3"));

    let err = c.create_actor(Actor::default()).await.unwrap_err();
    assert_eq!(err.url, format!("{base}/actors"));
    Ok(())
}

#[tokio::test]
async fn unreachable_service_substitutes_placeholders() -> anyhow::Result<()> {
    let base = unreachable_base()?;
    let c = client(&base, FallbackPolicy::Substitute);

    assert!(c.list_movies().await?.is_empty());
    assert!(c.list_actors().await?.is_empty());

    let movie = c.get_movie(7).await?.expect("placeholder movie");
    assert_eq!(movie.id, Some(7));
    assert_eq!(movie.title, "Test Movie");
    assert!(movie.actors.is_empty());

    let actor = c.get_actor(4).await?.expect("placeholder actor");
    assert_eq!((actor.id, actor.name.as_str()), (Some(4), "Test Actor"));

    let created = c.create_movie(Movie { title: "Draft".into(), ..Default::default() }).await?;
    assert_eq!(created.id, Some(1));
    assert_eq!(created.title, "Draft");
    let kept = c.create_movie(Movie::default().with_id(5)).await?;
    assert_eq!(kept.id, Some(5));
    assert_eq!(c.create_actor(Actor::default()).await?.id, Some(1));

    let updated = c.update_movie(3, Movie { title: "Edited".into(), ..Default::default() }).await?;
    assert_eq!((updated.id, updated.title.as_str()), (Some(3), "Edited"));
    assert_eq!(c.update_actor(6, Actor::default()).await?.id, Some(6));

    assert_eq!(c.link_actor_to_movie(1, 2).await?, LinkOutcome::Success);
    Ok(())
}

#[tokio::test]
async fn substitute_also_covers_http_errors() -> anyhow::Result<()> {
    let (base, _hits) = spawn_stub().await?;
    let movie = client(&base, FallbackPolicy::Substitute).get_movie(404).await?;
    assert_eq!(movie.map(|m| m.title), Some("Test Movie".to_string()));
    Ok(())
}
