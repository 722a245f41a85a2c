use serde::{Deserialize, Serialize};

use super::flash::Flash;
use crate::db::{FavoriteEntry, Review, SearchEntry, TravelPlan};
use crate::models::preferences::Preferences;
use crate::models::recommendation::Recommendation;
use crate::models::weather::Weather;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: bool,
    pub countries_cached: bool,
}

// Page contexts

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub defaults: Preferences,
}

#[derive(Debug, Serialize)]
pub struct ResultsPage {
    pub recommendations: Vec<Recommendation>,
    pub preferences: Preferences,
    pub degraded: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub searches: Vec<SearchEntry>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesPage {
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Serialize)]
pub struct PlansPage {
    pub plans: Vec<TravelPlan>,
    pub statuses: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CountryPage {
    pub country: CountryDetailDto,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Serialize)]
pub struct CountryDetailDto {
    pub name: String,
    pub official_name: String,
    pub capital: String,
    pub flag: String,
    pub region: String,
    pub subregion: String,
    /// Thousands-separated.
    pub population: String,
    /// Thousands-separated, whole square kilometres.
    pub area: String,
    pub languages: Vec<String>,
    pub currencies: Vec<String>,
    pub weather: Weather,
    pub rating: f64,
    pub reviews: i64,
    pub events: Vec<String>,
    pub tips: Vec<String>,
    pub landlocked: bool,
}

// Forms

#[derive(Debug, Default, Deserialize)]
pub struct NoteForm {
    pub note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub country_name: String,
    pub rating: Option<String>,
    pub comment: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    pub country_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<String>,
    pub activities: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlanStatusForm {
    pub status: String,
}
