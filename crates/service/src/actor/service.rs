use std::sync::Arc;

use models::Actor;
use tracing::{info, instrument};

use crate::client::MovieCardsApi;
use crate::errors::ServiceClientError;

/// Actor use cases on top of the remote service.
pub struct ActorService<A: MovieCardsApi + ?Sized = dyn MovieCardsApi> {
    api: Arc<A>,
}

impl<A: MovieCardsApi + ?Sized> Clone for ActorService<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api) }
    }
}

impl<A: MovieCardsApi + ?Sized> ActorService<A> {
    pub fn new(api: Arc<A>) -> Self { Self { api } }

    pub async fn list(&self) -> Result<Vec<Actor>, ServiceClientError> {
        self.api.list_actors().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Actor>, ServiceClientError> {
        self.api.get_actor(id).await
    }

    /// Update when the actor already has an id, create otherwise.
    #[instrument(skip(self, actor), fields(actor_id = ?actor.id))]
    pub async fn save(&self, actor: Actor) -> Result<Actor, ServiceClientError> {
        match actor.id {
            Some(id) => self.api.update_actor(id, actor).await,
            None => {
                let created = self.api.create_actor(actor).await?;
                info!(actor_id = ?created.id, "actor_created");
                Ok(created)
            }
        }
    }
}
