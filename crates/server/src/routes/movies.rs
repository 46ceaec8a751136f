use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use models::Movie;
use tracing::{info, warn};

use super::AppState;
use crate::errors::ApiError;
use crate::forms::{MovieForm, RegisterActorForm};
use crate::messages::{
    ACTOR_REGISTERED, ACTOR_REGISTRATION_FAILED, EDIT_MOVIE_TITLE, NEW_MOVIE_TITLE, SAVED_MOVIE_SUCCESS,
    UPDATED_MOVIE_SUCCESS,
};
use crate::views::{self, MovieFormPage};

fn edit_page(movie: &Movie, message: Option<&str>) -> Html<String> {
    edit_page_with_error(movie, message, None)
}

fn edit_page_with_error(movie: &Movie, message: Option<&str>, error: Option<&str>) -> Html<String> {
    let form = MovieForm::from(movie);
    Html(views::movie_form(&MovieFormPage {
        title: EDIT_MOVIE_TITLE,
        message,
        error,
        form: &form,
        actors: &movie.actors,
    }))
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let movies = state.movies.list().await?;
    info!(count = movies.len(), "list movies");
    Ok(Html(views::movie_list(&movies)))
}

pub async fn new_form() -> Html<String> {
    let form = MovieForm::default();
    Html(views::movie_form(&MovieFormPage {
        title: NEW_MOVIE_TITLE,
        message: None,
        error: None,
        form: &form,
        actors: &[],
    }))
}

pub async fn save(State(state): State<AppState>, Form(form): Form<MovieForm>) -> Result<Html<String>, ApiError> {
    let movie = match form.to_movie() {
        Ok(movie) => movie,
        Err(e) => {
            warn!(field = e.field(), "movie form rejected");
            let title = if form.has_id() { EDIT_MOVIE_TITLE } else { NEW_MOVIE_TITLE };
            return Ok(Html(views::movie_form(&MovieFormPage {
                title,
                message: None,
                error: Some(&e.to_string()),
                form: &form,
                actors: &[],
            })));
        }
    };

    let message = if movie.is_new() { SAVED_MOVIE_SUCCESS } else { UPDATED_MOVIE_SUCCESS };
    let saved = state.movies.save(movie).await?;
    info!(movie_id = ?saved.id, "movie saved");
    Ok(edit_page(&saved, Some(message)))
}

pub async fn edit(State(state): State<AppState>, Path(movie_id): Path<i32>) -> Result<Html<String>, ApiError> {
    let movie = find(&state, movie_id).await?;
    Ok(edit_page(&movie, None))
}

pub async fn register_actor(
    State(state): State<AppState>,
    Form(form): Form<RegisterActorForm>,
) -> Result<Html<String>, ApiError> {
    let movie_id = form.movie_id()?;
    let actor_id = match form.actor_id() {
        Ok(id) => id,
        Err(e) => {
            warn!(movie_id, field = e.field(), "actor registration rejected");
            let movie = find(&state, movie_id).await?;
            return Ok(edit_page_with_error(&movie, None, Some(&e.to_string())));
        }
    };

    let outcome = state.movies.register_actor(movie_id, actor_id).await?;
    let message = if outcome.is_success() { ACTOR_REGISTERED } else { ACTOR_REGISTRATION_FAILED };
    let movie = find(&state, movie_id).await?;
    Ok(edit_page(&movie, Some(message)))
}

async fn find(state: &AppState, movie_id: i32) -> Result<Movie, ApiError> {
    state
        .movies
        .get(movie_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("movie {movie_id}")))
}
