use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{error, info};

use super::validation::{parse_rating, validate_country_name};
use super::{AppState, FavoritesPage, FeedbackForm, NoteForm, PageError, flash};

pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let favorites = state.store().list_favorites().await.unwrap_or_else(|e| {
        error!("Failed to load favorites: {}", e);
        Vec::new()
    });

    state
        .render_page(&session, "favorites", "Избранное", FavoritesPage { favorites })
        .await
}

pub async fn save_note(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<NoteForm>,
) -> Redirect {
    match state
        .store()
        .update_favorite_note(id, form.note.as_deref())
        .await
    {
        Ok(true) => flash::success(&session, "Заметка успешно сохранена").await,
        Ok(false) => {
            info!("Note not saved, favorite {} does not exist", id);
            flash::error(&session, "Ошибка при сохранении заметки").await;
        }
        Err(e) => {
            error!("Failed to save note for favorite {}: {}", id, e);
            flash::error(&session, "Ошибка при сохранении заметки").await;
        }
    }

    Redirect::to("/favorites")
}

pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<FeedbackForm>,
) -> Redirect {
    let saved = match validate_country_name(&form.country_name) {
        Ok(country) => state
            .store()
            .save_feedback(country, parse_rating(form.rating.as_deref()), &form.comment)
            .await
            .map_err(|e| error!("Failed to save feedback for {}: {}", country, e))
            .is_ok(),
        Err(e) => {
            info!("Rejected feedback: {}", e);
            false
        }
    };

    if saved {
        flash::success(&session, "Спасибо за ваш отзыв!").await;
    } else {
        flash::error(&session, "Ошибка при сохранении отзыва").await;
    }

    Redirect::to("/favorites")
}
