use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppState, PageError, ResultsPage, flash};
use crate::models::preferences::Preferences;
use crate::services::RecommendError;

pub async fn recommend(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(preferences): Form<Preferences>,
) -> Result<Response, PageError> {
    let outcome = match state.recommend_service().recommend(&preferences).await {
        Ok(outcome) => outcome,
        Err(RecommendError::SearchNotSaved(_)) => {
            flash::error(&session, "Ошибка при сохранении параметров поиска").await;
            return Ok(Redirect::to("/").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let html = state
        .render_page(
            &session,
            "results",
            "Рекомендации",
            ResultsPage {
                recommendations: outcome.recommendations,
                preferences,
                degraded: outcome.degraded,
            },
        )
        .await?;

    Ok(html.into_response())
}
