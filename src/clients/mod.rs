pub mod openweather;
pub mod restcountries;

use crate::models::country::Country;
use crate::models::weather::Weather;
use anyhow::Result;

/// Where the country dataset comes from.
#[async_trait::async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<Country>>;
}

/// Current weather by city name. Implementations never fail: a lookup that
/// goes wrong yields [`Weather::fallback`].
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(&self, city: &str) -> Weather;
}
