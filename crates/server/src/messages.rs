//! User-facing texts shown by the views.

pub const NEW_MOVIE_TITLE: &str = "New movie";
pub const EDIT_MOVIE_TITLE: &str = "Edit movie";
pub const SAVED_MOVIE_SUCCESS: &str = "Movie saved successfully";
pub const UPDATED_MOVIE_SUCCESS: &str = "Movie updated successfully";

pub const NEW_ACTOR_TITLE: &str = "New actor";
pub const EDIT_ACTOR_TITLE: &str = "Edit actor";
pub const SAVED_ACTOR_SUCCESS: &str = "Actor saved successfully";
pub const UPDATED_ACTOR_SUCCESS: &str = "Actor updated successfully";

pub const ACTOR_REGISTERED: &str = "Actor registered in the movie";
pub const ACTOR_REGISTRATION_FAILED: &str = "The actor could not be registered in the movie";
