//! Form payloads posted by the HTML views.
//!
//! Every field arrives as text; conversion to the models happens here so a
//! failed conversion can re-render the form with what the user typed.

use models::{errors::ModelError, input, Actor, Movie};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieForm {
    pub id: String,
    pub title: String,
    pub country: String,
    pub release_date: String,
    pub duration: String,
    pub director: String,
    pub genre: String,
    pub synopsis: String,
}

impl MovieForm {
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn to_movie(&self) -> Result<Movie, ModelError> {
        Ok(Movie {
            id: input::optional_int("id", &self.id)?,
            title: input::text(&self.title),
            country: input::text(&self.country),
            release_date: input::optional_int("releaseDate", &self.release_date)?,
            duration: input::optional_int("duration", &self.duration)?,
            director: input::text(&self.director),
            genre: input::text(&self.genre),
            synopsis: input::text(&self.synopsis),
            actors: Vec::new(),
        })
    }
}

impl From<&Movie> for MovieForm {
    fn from(m: &Movie) -> Self {
        let num = |v: Option<i32>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            id: num(m.id),
            title: m.title.clone(),
            country: m.country.clone(),
            release_date: num(m.release_date),
            duration: num(m.duration),
            director: m.director.clone(),
            genre: m.genre.clone(),
            synopsis: m.synopsis.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorForm {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub dead_date: String,
    pub country: String,
}

impl ActorForm {
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Dates that do not parse as `yyyy-MM-dd` are dropped rather than rejected.
    pub fn to_actor(&self) -> Result<Actor, ModelError> {
        Ok(Actor {
            id: input::optional_int("id", &self.id)?,
            name: input::text(&self.name),
            birth_date: input::lenient_date(&self.birth_date),
            dead_date: input::lenient_date(&self.dead_date),
            country: input::text(&self.country),
            movies: Vec::new(),
        })
    }
}

impl From<&Actor> for ActorForm {
    fn from(a: &Actor) -> Self {
        Self {
            id: a.id.map(|n| n.to_string()).unwrap_or_default(),
            name: a.name.clone(),
            birth_date: input::format_date(a.birth_date),
            dead_date: input::format_date(a.dead_date),
            country: a.country.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterActorForm {
    pub movie_id: String,
    pub actor_id: String,
}

impl RegisterActorForm {
    pub fn movie_id(&self) -> Result<i32, ModelError> {
        input::required_int("movieId", &self.movie_id)
    }

    pub fn actor_id(&self) -> Result<i32, ModelError> {
        input::required_int("actorId", &self.actor_id)
    }
}
