//! Domain service for turning trip preferences into ranked destinations.

use crate::models::preferences::Preferences;
use crate::models::recommendation::Recommendation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// The search could not be logged; the request is aborted.
    #[error("Failed to save search: {0}")]
    SearchNotSaved(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for RecommendError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RecommendError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result of one recommendation request.
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub search_id: i64,
    pub recommendations: Vec<Recommendation>,
    /// Set when the pipeline failed and synthetic backups were served.
    pub degraded: bool,
}

#[async_trait::async_trait]
pub trait RecommendService: Send + Sync {
    /// Logs the search, then ranks candidate countries against `prefs`.
    ///
    /// Failures after the search is logged are absorbed: the outcome carries
    /// backup destinations and `degraded` is set.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::SearchNotSaved`] if the search row cannot be
    /// written.
    async fn recommend(
        &self,
        prefs: &Preferences,
    ) -> Result<RecommendationOutcome, RecommendError>;
}
