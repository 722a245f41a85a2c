use std::sync::Arc;
use std::time::Duration;

use crate::clients::openweather::OpenWeatherClient;
use crate::clients::restcountries::RestCountriesClient;
use crate::clients::{CountrySource, WeatherSource};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CountryCatalog, DefaultRecommendService, RecommendService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Per-request timeouts are set by each client.
fn build_shared_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .user_agent("TravelAI/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub catalog: Arc<CountryCatalog>,

    pub weather: Arc<dyn WeatherSource>,

    pub recommend_service: Arc<dyn RecommendService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client()?;

        let countries = Arc::new(RestCountriesClient::with_shared_client(
            http_client.clone(),
            config.countries.url.clone(),
            Duration::from_secs(config.countries.request_timeout_seconds),
        ));
        let weather = Arc::new(OpenWeatherClient::with_shared_client(
            http_client,
            config.weather.base_url.clone(),
            config.weather.api_key.clone(),
            Duration::from_secs(config.weather.request_timeout_seconds),
        ));

        Self::with_sources(config, countries, weather).await
    }

    /// Builds the state around the given data sources instead of the HTTP clients.
    pub async fn with_sources(
        config: Config,
        countries: Arc<dyn CountrySource>,
        weather: Arc<dyn WeatherSource>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let catalog = Arc::new(
            CountryCatalog::new(countries)
                .with_retry_after(Duration::from_secs(config.countries.retry_after_seconds)),
        );

        let recommend_service = Arc::new(DefaultRecommendService::new(
            store.clone(),
            catalog.clone(),
            weather.clone(),
            config.countries.candidate_limit,
            config.weather.max_concurrent_lookups,
        )) as Arc<dyn RecommendService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            catalog,
            weather,
            recommend_service,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
