use common::ActiveProfiles;
use models::{Actor, Movie};

pub const PLACEHOLDER_MOVIE_TITLE: &str = "Test Movie";
pub const PLACEHOLDER_ACTOR_NAME: &str = "Test Actor";
/// Identifier handed to a new record whose creation failed under [`FallbackPolicy::Substitute`].
pub const PLACEHOLDER_ID: i32 = 1;

/// What the client does when a remote call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the [`ServiceClientError`](crate::errors::ServiceClientError).
    #[default]
    Propagate,
    /// Swallow the error and return the operation's placeholder value.
    Substitute,
}

impl FallbackPolicy {
    /// `Substitute` when any active profile is a test profile.
    pub fn from_profiles(profiles: &ActiveProfiles) -> Self {
        if profiles.is_test() {
            FallbackPolicy::Substitute
        } else {
            FallbackPolicy::Propagate
        }
    }

    pub fn substitutes(self) -> bool {
        self == FallbackPolicy::Substitute
    }
}

pub fn placeholder_movie(id: i32) -> Movie {
    Movie { id: Some(id), title: PLACEHOLDER_MOVIE_TITLE.to_string(), actors: Vec::new(), ..Default::default() }
}

pub fn placeholder_actor(id: i32) -> Actor {
    Actor { id: Some(id), name: PLACEHOLDER_ACTOR_NAME.to_string(), ..Default::default() }
}

pub fn ensure_movie_id(mut movie: Movie) -> Movie {
    movie.id.get_or_insert(PLACEHOLDER_ID);
    movie
}

pub fn ensure_actor_id(mut actor: Actor) -> Actor {
    actor.id.get_or_insert(PLACEHOLDER_ID);
    actor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_select_substitute() {
        assert_eq!(FallbackPolicy::from_profiles(&ActiveProfiles::parse("dev,test")), FallbackPolicy::Substitute);
        assert_eq!(FallbackPolicy::from_profiles(&ActiveProfiles::parse("prod")), FallbackPolicy::Propagate);
        assert_eq!(FallbackPolicy::from_profiles(&ActiveProfiles::default()), FallbackPolicy::Propagate);
    }

    #[test]
    fn placeholders_are_deterministic() {
        let m = placeholder_movie(7);
        assert_eq!(m.id, Some(7));
        assert_eq!(m.title, "Test Movie");
        assert!(m.actors.is_empty());
        assert_eq!(placeholder_actor(3).name, "Test Actor");
    }

    #[test]
    fn ensure_id_keeps_existing_identifier() {
        assert_eq!(ensure_movie_id(Movie::default()).id, Some(1));
        assert_eq!(ensure_movie_id(Movie::default().with_id(5)).id, Some(5));
        assert_eq!(ensure_actor_id(Actor::default()).id, Some(1));
    }
}
