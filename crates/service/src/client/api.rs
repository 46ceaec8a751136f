use std::fmt;

use async_trait::async_trait;
use models::{Actor, Movie};

use crate::errors::ServiceClientError;

/// Result of linking an actor to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Success,
    Failure,
}

impl LinkOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkOutcome::Success => "success",
            LinkOutcome::Failure => "failure",
        }
    }

    pub fn is_success(self) -> bool {
        self == LinkOutcome::Success
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations offered by moviecards-service.
#[async_trait]
pub trait MovieCardsApi: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, ServiceClientError>;
    async fn get_movie(&self, id: i32) -> Result<Option<Movie>, ServiceClientError>;
    async fn create_movie(&self, movie: Movie) -> Result<Movie, ServiceClientError>;
    /// Replace the stored movie, then return what the service holds afterwards.
    async fn update_movie(&self, id: i32, movie: Movie) -> Result<Movie, ServiceClientError>;
    async fn link_actor_to_movie(&self, movie_id: i32, actor_id: i32) -> Result<LinkOutcome, ServiceClientError>;

    async fn list_actors(&self) -> Result<Vec<Actor>, ServiceClientError>;
    async fn get_actor(&self, id: i32) -> Result<Option<Actor>, ServiceClientError>;
    async fn create_actor(&self, actor: Actor) -> Result<Actor, ServiceClientError>;
    async fn update_actor(&self, id: i32, actor: Actor) -> Result<Actor, ServiceClientError>;
}

/// Simple in-memory mock of the remote service for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockMovieCardsApi {
        movies: Mutex<BTreeMap<i32, Movie>>,
        actors: Mutex<BTreeMap<i32, Actor>>,
        calls: Mutex<Vec<String>>,
        failing: bool,
    }

    impl MockMovieCardsApi {
        /// Every call fails with a transport error.
        pub fn failing() -> Self {
            Self { failing: true, ..Default::default() }
        }

        pub fn with_movies(self, movies: impl IntoIterator<Item = Movie>) -> Self {
            {
                let mut map = self.movies.lock().unwrap();
                for m in movies {
                    if let Some(id) = m.id {
                        map.insert(id, m);
                    }
                }
            }
            self
        }

        pub fn with_actors(self, actors: impl IntoIterator<Item = Actor>) -> Self {
            {
                let mut map = self.actors.lock().unwrap();
                for a in actors {
                    if let Some(id) = a.id {
                        map.insert(id, a);
                    }
                }
            }
            self
        }

        /// Calls received so far, e.g. `["create_movie", "get_movie 1"]`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<(), ServiceClientError> {
            let url = format!("mock://moviecards/{}", call.replace(' ', "/"));
            self.calls.lock().unwrap().push(call);
            if self.failing {
                return Err(ServiceClientError::transport("mock service unavailable", &url, "connection refused"));
            }
            Ok(())
        }

        fn next_id<T>(map: &BTreeMap<i32, T>) -> i32 {
            map.keys().next_back().map(|k| k + 1).unwrap_or(1)
        }
    }

    #[async_trait]
    impl MovieCardsApi for MockMovieCardsApi {
        async fn list_movies(&self) -> Result<Vec<Movie>, ServiceClientError> {
            self.record("list_movies".into())?;
            Ok(self.movies.lock().unwrap().values().cloned().collect())
        }

        async fn get_movie(&self, id: i32) -> Result<Option<Movie>, ServiceClientError> {
            self.record(format!("get_movie {id}"))?;
            Ok(self.movies.lock().unwrap().get(&id).cloned())
        }

        async fn create_movie(&self, movie: Movie) -> Result<Movie, ServiceClientError> {
            self.record("create_movie".into())?;
            let mut movies = self.movies.lock().unwrap();
            let id = Self::next_id(&movies);
            let stored = movie.with_id(id);
            movies.insert(id, stored.clone());
            Ok(stored)
        }

        async fn update_movie(&self, id: i32, movie: Movie) -> Result<Movie, ServiceClientError> {
            self.record(format!("update_movie {id}"))?;
            self.movies.lock().unwrap().insert(id, movie.with_id(id));
            self.get_movie(id)
                .await
                .map(|found| found.unwrap_or_else(|| crate::client::fallback::placeholder_movie(id)))
        }

        async fn link_actor_to_movie(&self, movie_id: i32, actor_id: i32) -> Result<LinkOutcome, ServiceClientError> {
            self.record(format!("link_actor_to_movie {movie_id} {actor_id}"))?;
            let mut movies = self.movies.lock().unwrap();
            let mut actors = self.actors.lock().unwrap();
            match (movies.get_mut(&movie_id), actors.get_mut(&actor_id)) {
                (Some(movie), Some(actor)) => {
                    if !movie.actors.iter().any(|a| a.id == Some(actor_id)) {
                        movie.actors.push(Actor { movies: Vec::new(), ..actor.clone() });
                        actor.movies.push(Movie { actors: Vec::new(), ..movie.clone() });
                    }
                    Ok(LinkOutcome::Success)
                }
                _ => Ok(LinkOutcome::Failure),
            }
        }

        async fn list_actors(&self) -> Result<Vec<Actor>, ServiceClientError> {
            self.record("list_actors".into())?;
            Ok(self.actors.lock().unwrap().values().cloned().collect())
        }

        async fn get_actor(&self, id: i32) -> Result<Option<Actor>, ServiceClientError> {
            self.record(format!("get_actor {id}"))?;
            Ok(self.actors.lock().unwrap().get(&id).cloned())
        }

        async fn create_actor(&self, actor: Actor) -> Result<Actor, ServiceClientError> {
            self.record("create_actor".into())?;
            let mut actors = self.actors.lock().unwrap();
            let id = Self::next_id(&actors);
            let stored = actor.with_id(id);
            actors.insert(id, stored.clone());
            Ok(stored)
        }

        async fn update_actor(&self, id: i32, actor: Actor) -> Result<Actor, ServiceClientError> {
            self.record(format!("update_actor {id}"))?;
            self.actors.lock().unwrap().insert(id, actor.with_id(id));
            self.get_actor(id)
                .await
                .map(|found| found.unwrap_or_else(|| crate::client::fallback::placeholder_actor(id)))
        }
    }

}
