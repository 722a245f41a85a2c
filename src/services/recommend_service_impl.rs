//! Default implementation of the `RecommendService` trait.

use crate::clients::WeatherSource;
use crate::db::{NewFavorite, Store};
use crate::models::country::Country;
use crate::models::preferences::Preferences;
use crate::models::recommendation::Recommendation;
use crate::models::weather::Weather;
use crate::services::countries::CountryCatalog;
use crate::services::ranking;
use crate::services::recommend_service::{
    RecommendError, RecommendService, RecommendationOutcome,
};
use async_trait::async_trait;
use futures::{StreamExt, stream};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct DefaultRecommendService {
    store: Store,
    catalog: Arc<CountryCatalog>,
    weather: Arc<dyn WeatherSource>,
    candidate_limit: usize,
    max_concurrent_lookups: usize,
}

impl DefaultRecommendService {
    #[must_use]
    pub fn new(
        store: Store,
        catalog: Arc<CountryCatalog>,
        weather: Arc<dyn WeatherSource>,
        candidate_limit: usize,
        max_concurrent_lookups: usize,
    ) -> Self {
        Self {
            store,
            catalog,
            weather,
            candidate_limit,
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        }
    }

    /// Weather for the first `candidate_limit` usable countries, in dataset order.
    async fn gather_candidates(&self, countries: &[Country]) -> Vec<(Country, Weather)> {
        let usable: Vec<Country> = countries
            .iter()
            .take(self.candidate_limit)
            .filter(|c| c.common_name().is_some() && c.primary_capital().is_some())
            .cloned()
            .collect();

        debug!("Looking up weather for {} candidates", usable.len());

        stream::iter(usable)
            .map(|country| async move {
                let capital = country.primary_capital().unwrap_or_default();
                let reading = self.weather.current_weather(capital).await;
                (country, reading)
            })
            .buffered(self.max_concurrent_lookups)
            .collect()
            .await
    }

    async fn run_pipeline(
        &self,
        search_id: i64,
        prefs: &Preferences,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let countries = self.catalog.countries().await;
        let ratings = self.store.country_ratings().await?;

        let candidates = self.gather_candidates(&countries).await;
        let recommendations = ranking::rank(candidates, &ratings, prefs);

        if let Some(top) = recommendations.first() {
            let favorite = NewFavorite {
                country_name: top.name.clone(),
                capital: Some(top.capital.clone()),
                flag_url: Some(top.flag.clone()),
                weather_temp: Some(top.weather.temp),
                weather_desc: Some(top.weather.description.clone()),
                search_id: Some(search_id),
                notes: None,
            };
            if let Err(e) = self.store.save_favorite(&favorite).await {
                warn!("Failed to save top result {} as favorite: {}", top.name, e);
            }
        }

        Ok(recommendations)
    }
}

#[async_trait]
impl RecommendService for DefaultRecommendService {
    async fn recommend(
        &self,
        prefs: &Preferences,
    ) -> Result<RecommendationOutcome, RecommendError> {
        let search_id = self
            .store
            .save_search(&prefs.search_params(), &prefs.budget)
            .await
            .map_err(|e| {
                error!("Failed to save search: {}", e);
                RecommendError::SearchNotSaved(e.to_string())
            })?;

        metrics::counter!("recommendations_total").increment(1);

        match self.run_pipeline(search_id, prefs).await {
            Ok(recommendations) => {
                info!(
                    search_id,
                    count = recommendations.len(),
                    "Recommendations ready"
                );
                Ok(RecommendationOutcome {
                    search_id,
                    recommendations,
                    degraded: false,
                })
            }
            Err(e) => {
                warn!("Recommendation pipeline failed, serving backups: {}", e);
                metrics::counter!("recommendations_degraded_total").increment(1);
                Ok(RecommendationOutcome {
                    search_id,
                    recommendations: ranking::degraded_recommendations(
                        prefs.travel_type(),
                        prefs.duration(),
                    ),
                    degraded: true,
                })
            }
        }
    }
}
