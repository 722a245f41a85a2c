use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::error;

use super::{
    AppState, CountryDetailDto, CountryPage, HistoryPage, HomePage, PageError, flash,
};
use crate::models::country::group_thousands;
use crate::models::preferences::Preferences;
use crate::services::advisory;

pub const HISTORY_LIMIT: u64 = 10;
pub const REVIEWS_LIMIT: u64 = 5;

pub async fn home(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    state
        .render_page(
            &session,
            "index",
            "Подбор путешествия",
            HomePage {
                defaults: Preferences::default(),
            },
        )
        .await
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let searches = state
        .store()
        .search_history(HISTORY_LIMIT)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to load search history: {}", e);
            Vec::new()
        });

    state
        .render_page(&session, "history", "История поиска", HistoryPage { searches })
        .await
}

pub async fn country_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(name): Path<String>,
) -> Result<Response, PageError> {
    let Some(country) = state.shared.catalog.find(&name).await else {
        flash::error(&session, "Страна не найдена").await;
        return Ok(Redirect::to("/").into_response());
    };

    let capital = country.primary_capital().unwrap_or_default().to_string();
    let weather = state.shared.weather.current_weather(&capital).await;

    let rating = state
        .store()
        .country_ratings()
        .await
        .unwrap_or_else(|e| {
            error!("Failed to load ratings: {}", e);
            Default::default()
        })
        .get(&name)
        .copied();

    let reviews = state
        .store()
        .recent_reviews(&name, REVIEWS_LIMIT)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to load reviews for {}: {}", name, e);
            Vec::new()
        });

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let area = country.area.max(0.0).round() as u64;

    let detail = CountryDetailDto {
        official_name: country.official_name().to_string(),
        flag: country.flags.png.clone(),
        region: country.region.clone(),
        subregion: country.subregion.clone(),
        population: group_thousands(country.population),
        area: group_thousands(area),
        languages: country.language_names(),
        currencies: country.currency_codes(),
        weather,
        rating: rating.map_or(0.0, |r| r.rating),
        reviews: rating.map_or(0, |r| r.reviews),
        events: advisory::upcoming_events(&capital),
        tips: advisory::travel_tips(&name),
        landlocked: country.landlocked,
        capital,
        name,
    };

    let html = state
        .render_page(
            &session,
            "country",
            "О стране",
            CountryPage {
                country: detail,
                reviews,
            },
        )
        .await?;

    Ok(html.into_response())
}
