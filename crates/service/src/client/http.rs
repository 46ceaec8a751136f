use async_trait::async_trait;
use configs::MovieCardsConfig;
use models::{Actor, Movie};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use super::api::{LinkOutcome, MovieCardsApi};
use super::fallback::{self, FallbackPolicy};
use crate::errors::ServiceClientError;
use crate::observability::{self, Outcome};

/// reqwest-backed client for moviecards-service.
///
/// One instance is built per process and shared; `reqwest::Client` pools
/// connections internally, so clones are cheap.
#[derive(Clone, Debug)]
pub struct MovieCardsClient {
    http: Client,
    base_url: String,
    fallback: FallbackPolicy,
}

impl MovieCardsClient {
    pub fn new(http: Client, base_url: impl Into<String>, fallback: FallbackPolicy) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, fallback }
    }

    /// Build the shared HTTP client with the configured request timeout.
    pub fn from_config(cfg: &MovieCardsConfig, fallback: FallbackPolicy) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self::new(http, cfg.service_url.clone(), fallback))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<Option<T>, ServiceClientError> {
        debug!(%url, "GET");
        let resp = self.http.get(url).send().await.map_err(|e| transport_error(url, what, e))?;
        let resp = ensure_success(resp, url, what).await?;
        read_json(resp, url, what).await
    }

    async fn send<B, T>(&self, method: Method, url: &str, body: &B, what: &str) -> Result<Option<T>, ServiceClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(%url, %method, "sending body");
        let resp = self
            .http
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(url, what, e))?;
        let resp = ensure_success(resp, url, what).await?;
        read_json(resp, url, what).await
    }

    /// PUT whose response body, if any, is ignored.
    async fn put<B>(&self, url: &str, body: &B, what: &str) -> Result<(), ServiceClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        debug!(%url, "PUT");
        let resp = self.http.put(url).json(body).send().await.map_err(|e| transport_error(url, what, e))?;
        ensure_success(resp, url, what).await?;
        Ok(())
    }

    fn settle<T>(
        &self,
        operation: &'static str,
        result: Result<T, ServiceClientError>,
        placeholder: impl FnOnce() -> T,
    ) -> Result<T, ServiceClientError> {
        match result {
            Ok(value) => {
                observability::record_call(operation, Outcome::Ok);
                Ok(value)
            }
            Err(err) => self.fall_back(operation, err, placeholder),
        }
    }

    fn fall_back<T>(
        &self,
        operation: &'static str,
        err: ServiceClientError,
        placeholder: impl FnOnce() -> T,
    ) -> Result<T, ServiceClientError> {
        observability::record_call(operation, Outcome::Error);
        match self.fallback {
            FallbackPolicy::Substitute => {
                warn!(operation, url = %err.url, status = ?err.status, error = %err, "remote call failed, returning placeholder");
                observability::record_fallback(operation);
                Ok(placeholder())
            }
            FallbackPolicy::Propagate => {
                error!(
                    operation,
                    url = %err.url,
                    status = ?err.status,
                    body = ?err.body,
                    cause = ?err.cause,
                    "{}",
                    err.message
                );
                Err(err)
            }
        }
    }
}

fn transport_error(url: &str, what: &str, e: reqwest::Error) -> ServiceClientError {
    let message = if e.is_timeout() {
        format!("moviecards-service timed out while trying to {what}")
    } else {
        format!("could not reach moviecards-service to {what}")
    };
    ServiceClientError::transport(message, url, e)
}

async fn ensure_success(resp: Response, url: &str, what: &str) -> Result<Response, ServiceClientError> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(%url, %status, error = %e, "could not read error body");
                String::new()
            }
        };
        return Err(ServiceClientError::http(
            format!("moviecards-service answered {status} while trying to {what}"),
            url,
            status.as_u16(),
            body,
        ));
    }
    Ok(resp)
}

/// An empty (or whitespace-only) body decodes to `None`.
async fn read_json<T: DeserializeOwned>(resp: Response, url: &str, what: &str) -> Result<Option<T>, ServiceClientError> {
    let bytes = resp.bytes().await.map_err(|e| transport_error(url, what, e))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        ServiceClientError::transport(format!("malformed response while trying to {what}"), url, e)
    })
}

#[async_trait]
impl MovieCardsApi for MovieCardsClient {
    async fn list_movies(&self) -> Result<Vec<Movie>, ServiceClientError> {
        let _timer = observability::start_timer("list_movies");
        let url = self.url("/movies");
        let result = self.fetch::<Vec<Movie>>(&url, "list movies").await.map(Option::unwrap_or_default);
        self.settle("list_movies", result, Vec::new)
    }

    async fn get_movie(&self, id: i32) -> Result<Option<Movie>, ServiceClientError> {
        let _timer = observability::start_timer("get_movie");
        let url = self.url(&format!("/movies/{id}"));
        let result = self.fetch::<Movie>(&url, &format!("get movie {id}")).await;
        self.settle("get_movie", result, || Some(fallback::placeholder_movie(id)))
    }

    async fn create_movie(&self, movie: Movie) -> Result<Movie, ServiceClientError> {
        let _timer = observability::start_timer("create_movie");
        let url = self.url("/movies");
        match self.send::<_, Movie>(Method::POST, &url, &movie, "create movie").await {
            Ok(created) => {
                observability::record_call("create_movie", Outcome::Ok);
                Ok(created.unwrap_or(movie))
            }
            Err(err) => self.fall_back("create_movie", err, || fallback::ensure_movie_id(movie)),
        }
    }

    async fn update_movie(&self, id: i32, movie: Movie) -> Result<Movie, ServiceClientError> {
        let _timer = observability::start_timer("update_movie");
        let url = self.url(&format!("/movies/{id}"));
        match self.put(&url, &movie, &format!("update movie {id}")).await {
            Ok(()) => {
                observability::record_call("update_movie", Outcome::Ok);
                let refreshed = self.get_movie(id).await?;
                Ok(refreshed.unwrap_or_else(|| movie.with_id(id)))
            }
            Err(err) => self.fall_back("update_movie", err, || movie.with_id(id)),
        }
    }

    async fn link_actor_to_movie(&self, movie_id: i32, actor_id: i32) -> Result<LinkOutcome, ServiceClientError> {
        let _timer = observability::start_timer("link_actor_to_movie");
        let url = self.url(&format!("/movies/{movie_id}/actors/{actor_id}"));
        debug!(%url, "POST");
        let result = match self.http.post(&url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => Ok(LinkOutcome::Success),
            Ok(resp) => {
                debug!(%url, status = %resp.status(), "link not accepted");
                Ok(LinkOutcome::Failure)
            }
            Err(e) => Err(transport_error(&url, "link actor to movie", e)),
        };
        self.settle("link_actor_to_movie", result, || LinkOutcome::Success)
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, ServiceClientError> {
        let _timer = observability::start_timer("list_actors");
        let url = self.url("/actors");
        let result = self.fetch::<Vec<Actor>>(&url, "list actors").await.map(Option::unwrap_or_default);
        self.settle("list_actors", result, Vec::new)
    }

    async fn get_actor(&self, id: i32) -> Result<Option<Actor>, ServiceClientError> {
        let _timer = observability::start_timer("get_actor");
        let url = self.url(&format!("/actors/{id}"));
        let result = self.fetch::<Actor>(&url, &format!("get actor {id}")).await;
        self.settle("get_actor", result, || Some(fallback::placeholder_actor(id)))
    }

    async fn create_actor(&self, actor: Actor) -> Result<Actor, ServiceClientError> {
        let _timer = observability::start_timer("create_actor");
        let url = self.url("/actors");
        match self.send::<_, Actor>(Method::POST, &url, &actor, "create actor").await {
            Ok(created) => {
                observability::record_call("create_actor", Outcome::Ok);
                Ok(created.unwrap_or(actor))
            }
            Err(err) => self.fall_back("create_actor", err, || fallback::ensure_actor_id(actor)),
        }
    }

    async fn update_actor(&self, id: i32, actor: Actor) -> Result<Actor, ServiceClientError> {
        let _timer = observability::start_timer("update_actor");
        let url = self.url(&format!("/actors/{id}"));
        match self.put(&url, &actor, &format!("update actor {id}")).await {
            Ok(()) => {
                observability::record_call("update_actor", Outcome::Ok);
                let refreshed = self.get_actor(id).await?;
                Ok(refreshed.unwrap_or_else(|| actor.with_id(id)))
            }
            Err(err) => self.fall_back("update_actor", err, || actor.with_id(id)),
        }
    }
}
