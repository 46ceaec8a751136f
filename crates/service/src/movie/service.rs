use std::sync::Arc;

use models::Movie;
use tracing::{info, instrument};

use crate::client::{LinkOutcome, MovieCardsApi};
use crate::errors::ServiceClientError;

/// Movie use cases on top of the remote service.
pub struct MovieService<A: MovieCardsApi + ?Sized = dyn MovieCardsApi> {
    api: Arc<A>,
}

impl<A: MovieCardsApi + ?Sized> Clone for MovieService<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api) }
    }
}

impl<A: MovieCardsApi + ?Sized> MovieService<A> {
    pub fn new(api: Arc<A>) -> Self { Self { api } }

    pub async fn list(&self) -> Result<Vec<Movie>, ServiceClientError> {
        self.api.list_movies().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>, ServiceClientError> {
        self.api.get_movie(id).await
    }

    /// Update when the movie already has an id, create otherwise.
    ///
    /// # Examples
    /// ```
    /// use service::client::api::mock::MockMovieCardsApi;
    /// use service::movie::MovieService;
    /// use std::sync::Arc;
    /// let api = Arc::new(MockMovieCardsApi::default());
    /// let svc = MovieService::new(api.clone());
    /// let movie = models::Movie { title: "Heat".into(), ..Default::default() };
    /// let saved = tokio_test::block_on(svc.save(movie)).unwrap();
    /// assert_eq!(saved.id, Some(1));
    /// assert_eq!(api.calls(), vec!["create_movie".to_string()]);
    /// ```
    #[instrument(skip(self, movie), fields(movie_id = ?movie.id))]
    pub async fn save(&self, movie: Movie) -> Result<Movie, ServiceClientError> {
        match movie.id {
            Some(id) => self.api.update_movie(id, movie).await,
            None => {
                let created = self.api.create_movie(movie).await?;
                info!(movie_id = ?created.id, "movie_created");
                Ok(created)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn register_actor(&self, movie_id: i32, actor_id: i32) -> Result<LinkOutcome, ServiceClientError> {
        let outcome = self.api.link_actor_to_movie(movie_id, actor_id).await?;
        info!(%outcome, "actor_registration");
        Ok(outcome)
    }
}
