use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use models::Actor;
use tracing::{info, warn};

use super::AppState;
use crate::errors::ApiError;
use crate::forms::ActorForm;
use crate::messages::{EDIT_ACTOR_TITLE, NEW_ACTOR_TITLE, SAVED_ACTOR_SUCCESS, UPDATED_ACTOR_SUCCESS};
use crate::views::{self, ActorFormPage};

fn edit_page(actor: &Actor, message: Option<&str>) -> Html<String> {
    let form = ActorForm::from(actor);
    Html(views::actor_form(&ActorFormPage {
        title: EDIT_ACTOR_TITLE,
        message,
        error: None,
        form: &form,
        movies: &actor.movies,
    }))
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let actors = state.actors.list().await?;
    info!(count = actors.len(), "list actors");
    Ok(Html(views::actor_list(&actors)))
}

pub async fn new_form() -> Html<String> {
    let form = ActorForm::default();
    Html(views::actor_form(&ActorFormPage {
        title: NEW_ACTOR_TITLE,
        message: None,
        error: None,
        form: &form,
        movies: &[],
    }))
}

pub async fn save(State(state): State<AppState>, Form(form): Form<ActorForm>) -> Result<Html<String>, ApiError> {
    let actor = match form.to_actor() {
        Ok(actor) => actor,
        Err(e) => {
            warn!(field = e.field(), "actor form rejected");
            let title = if form.has_id() { EDIT_ACTOR_TITLE } else { NEW_ACTOR_TITLE };
            return Ok(Html(views::actor_form(&ActorFormPage {
                title,
                message: None,
                error: Some(&e.to_string()),
                form: &form,
                movies: &[],
            })));
        }
    };

    let message = if actor.is_new() { SAVED_ACTOR_SUCCESS } else { UPDATED_ACTOR_SUCCESS };
    let saved = state.actors.save(actor).await?;
    info!(actor_id = ?saved.id, "actor saved");
    Ok(edit_page(&saved, Some(message)))
}

pub async fn edit(State(state): State<AppState>, Path(actor_id): Path<i32>) -> Result<Html<String>, ApiError> {
    let actor = state
        .actors
        .get(actor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("actor {actor_id}")))?;
    Ok(edit_page(&actor, None))
}
